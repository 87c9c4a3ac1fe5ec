// This module talks to direnv, the environment manager whose `.envrc` we extend.
// The only question asked is "which `.envrc` governs the current directory?",
// answered by decoding `direnv status --json`.

use crate::libs::errors::DirenvError;
use crate::libs::process;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Locates the configuration file of the environment manager that governs the
/// current directory.
pub trait EnvironmentManager {
    /// Returns the path of the governing `.envrc`, or [`DirenvError::NotManaged`]
    /// when no such file exists.
    fn find_envrc(&self) -> Result<PathBuf, DirenvError>;
}

/// Shape of `direnv status --json`. Only the fields we read are modelled.
#[derive(Debug, Default, Deserialize)]
pub struct CommandStatus {
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub state: State,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "ConfigDir", default)]
    pub config_dir: String,
    #[serde(rename = "SelfPath", default)]
    pub self_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct State {
    #[serde(rename = "foundRC")]
    pub found_rc: Option<Rc>,
    #[serde(rename = "loadedRC")]
    pub loaded_rc: Option<Rc>,
}

#[derive(Debug, Deserialize)]
pub struct Rc {
    #[serde(default)]
    pub allowed: i64,
    #[serde(default)]
    pub path: String,
}

impl CommandStatus {
    /// The `.envrc` direnv found for the current directory, if any.
    pub fn found_envrc(&self) -> Result<PathBuf, DirenvError> {
        match &self.state.found_rc {
            Some(rc) if !rc.path.is_empty() => Ok(PathBuf::from(&rc.path)),
            _ => Err(DirenvError::NotManaged),
        }
    }
}

/// The real `direnv` executable.
#[derive(Debug, Clone)]
pub struct Direnv {
    program: OsString,
}

impl Direnv {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn status(&self) -> Result<CommandStatus, DirenvError> {
        let output = process::run(&self.program, &["status", "--json"], None)?;
        let status: CommandStatus = serde_json::from_slice(&output.stdout)?;
        tracing::debug!(
            self_path = %status.config.self_path,
            config_dir = %status.config.config_dir,
            found = status.state.found_rc.as_ref().map(|rc| rc.path.as_str()),
            allowed = status.state.found_rc.as_ref().map(|rc| rc.allowed),
            loaded = status.state.loaded_rc.is_some(),
            "direnv status"
        );
        Ok(status)
    }
}

impl EnvironmentManager for Direnv {
    fn find_envrc(&self) -> Result<PathBuf, DirenvError> {
        self.status()?.found_envrc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> CommandStatus {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn found_rc_path_is_returned() {
        let status = decode(
            r#"{
                "config": {"ConfigDir": "/home/u/.config/direnv", "SelfPath": "/usr/bin/direnv"},
                "state": {
                    "foundRC": {"allowed": 0, "path": "/work/project/.envrc"},
                    "loadedRC": null
                }
            }"#,
        );
        assert_eq!(
            status.found_envrc().unwrap(),
            PathBuf::from("/work/project/.envrc")
        );
        assert_eq!(status.config.self_path, "/usr/bin/direnv");
    }

    #[test]
    fn missing_found_rc_means_not_managed() {
        let status = decode(r#"{"config": {}, "state": {"foundRC": null, "loadedRC": null}}"#);
        assert!(matches!(status.found_envrc(), Err(DirenvError::NotManaged)));
    }

    #[test]
    fn empty_found_rc_path_means_not_managed() {
        let status = decode(r#"{"state": {"foundRC": {"allowed": 2, "path": ""}}}"#);
        assert!(matches!(status.found_envrc(), Err(DirenvError::NotManaged)));
    }

    #[cfg(unix)]
    #[test]
    fn failing_direnv_is_a_collaborator_error() {
        let direnv = Direnv::new("false");
        assert!(matches!(
            direnv.find_envrc(),
            Err(DirenvError::Collaborator(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn garbage_output_is_a_decode_error() {
        // `echo status --json` prints its arguments, which is not JSON.
        let direnv = Direnv::new("echo");
        assert!(matches!(direnv.find_envrc(), Err(DirenvError::Decode(_))));
    }
}
