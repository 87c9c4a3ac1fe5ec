// Error taxonomy for add-direnv-gotool.
//
// Library code returns these typed errors; the orchestrator wraps them with
// `anyhow` context and `main` decides how to present them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or missing user input. Reported to the user as-is, without any
/// error chain attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ArgumentError {
    pub message: String,
}

impl ArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures talking to direnv.
#[derive(Debug, Error)]
pub enum DirenvError {
    /// The working tree has no `.envrc` that direnv knows about.
    #[error("directory is not managed by direnv")]
    NotManaged,

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("could not decode `direnv status --json` output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// An external program could not be started or exited unsuccessfully.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("could not execute `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran but failed; `stderr` is the program's diagnostic text, verbatim.
    #[error("command `{program}` failed: {stderr}")]
    Failed { program: String, stderr: String },
}

/// The phase of [`crate::libs::envrc::ensure_line`] that failed.
#[derive(Debug, Error)]
pub enum EnvrcError {
    #[error("could not open {} for appending: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read through {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not append to {}: {source}", path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any other filesystem operation, tagged with what was being attempted.
#[derive(Debug, Error)]
#[error("could not {operation} {}: {source}", path.display())]
pub struct FsError {
    pub operation: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsError {
    pub fn new(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Failures from the go toolchain adapter.
#[derive(Debug, Error)]
pub enum GoError {
    #[error("module name cannot be empty")]
    EmptyModuleName,

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("could not decode `go mod edit -json` output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Fs(#[from] FsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_error_displays_only_the_message() {
        let err = ArgumentError::new("a single package path must be provided");
        assert_eq!(err.to_string(), "a single package path must be provided");
    }

    #[test]
    fn collaborator_failure_surfaces_stderr_verbatim() {
        let err = CollaboratorError::Failed {
            program: "go".into(),
            stderr: "go: module example.com/nope: not found\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "command `go` failed: go: module example.com/nope: not found\n"
        );
    }

    #[test]
    fn envrc_errors_name_the_phase() {
        let source = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let path = PathBuf::from("/p/.envrc");
        let open = EnvrcError::Open {
            path: path.clone(),
            source: source(),
        };
        let read = EnvrcError::Read {
            path: path.clone(),
            source: source(),
        };
        let append = EnvrcError::Append {
            path,
            source: source(),
        };
        assert!(open.to_string().starts_with("could not open /p/.envrc"));
        assert!(read.to_string().starts_with("could not read through /p/.envrc"));
        assert!(append.to_string().starts_with("could not append to /p/.envrc"));
    }

    #[test]
    fn fs_error_includes_operation_and_path() {
        let err = FsError::new(
            "create tools directory",
            "/p/.gotools",
            io::Error::new(io::ErrorKind::Other, "boom"),
        );
        assert_eq!(err.to_string(), "could not create tools directory /p/.gotools: boom");
    }
}
