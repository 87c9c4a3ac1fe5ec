// Thin wrapper around `std::process::Command` shared by the collaborator adapters.
// Runs a program to completion, captures its output, and turns a failing exit
// status into a `CollaboratorError` that carries the program's stderr.

use crate::libs::errors::CollaboratorError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Runs `program args...` (optionally inside `cwd`) and returns its captured output
/// when it exits successfully.
pub fn run<S: AsRef<OsStr>>(
    program: &OsStr,
    args: &[S],
    cwd: Option<&Path>,
) -> Result<Output, CollaboratorError> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let cmd_line = describe(program, args);
    tracing::debug!(cmd = %cmd_line, "executing command");

    let output = command.output().map_err(|source| CollaboratorError::Spawn {
        program: program.to_string_lossy().into_owned(),
        source,
    })?;

    if output.status.success() {
        if !output.stderr.is_empty() {
            tracing::debug!(
                cmd = %cmd_line,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "command succeeded with diagnostics"
            );
        }
        Ok(output)
    } else {
        let code = output.status.code();
        tracing::debug!(cmd = %cmd_line, code = ?code, "command failed");
        Err(CollaboratorError::Failed {
            program: program.to_string_lossy().into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn describe<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|arg| arg.as_ref().to_string_lossy().into_owned()));
    parts.join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_command_returns_stdout() {
        let output = run(OsStr::new("sh"), &["-c", "printf hello"], None).unwrap();
        assert_eq!(output.stdout, b"hello");
    }

    #[test]
    fn failing_command_carries_stderr() {
        let err = run(OsStr::new("sh"), &["-c", "echo broken >&2; exit 3"], None).unwrap_err();
        match err {
            CollaboratorError::Failed { program, stderr } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run(
            OsStr::new("definitely-not-a-real-program-7f3a"),
            &[] as &[&str],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CollaboratorError::Spawn { .. }));
    }

    #[test]
    fn command_line_lists_program_then_arguments() {
        assert_eq!(
            describe(OsStr::new("go"), &["get", "-tool", "example.com/tool@latest"]),
            "go get -tool example.com/tool@latest"
        );
        assert_eq!(describe(OsStr::new("direnv"), &[] as &[&str]), "direnv");
    }

    #[test]
    fn runs_inside_the_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(OsStr::new("sh"), &["-c", "pwd -P"], Some(dir.path())).unwrap();
        let reported = String::from_utf8(output.stdout).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(reported.trim_end(), expected.to_str().unwrap());
    }
}
