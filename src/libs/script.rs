// Generates the launcher script that lives in the tools directory.
//
// direnv puts the tools directory on PATH, so running `goimports` inside the
// project executes `<tools-dir>/goimports`, which hands over to `go tool`.

use crate::libs::errors::FsError;
use crate::libs::paths::make_executable;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Values substituted into the launcher script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptArgs<'a> {
    /// Package path as given by the user, possibly with a `@version` selector.
    pub package_path: &'a str,
    pub command_name: &'a str,
    /// Filename of the isolated module file, relative to the script's own directory.
    pub isolated_module: Option<&'a str>,
    /// Name of the program that generated the script, for the header comment.
    pub generator: &'a str,
}

/// The package path `go tool` expects: the version selector removed.
fn tool_package(package_path: &str) -> &str {
    match package_path.find('@') {
        Some(index) => &package_path[..index],
        None => package_path,
    }
}

/// Renders the script body.
pub fn render(args: &ScriptArgs<'_>) -> String {
    let package = shell_words::quote(tool_package(args.package_path.trim()));
    let mut script = String::new();
    script.push_str("#!/bin/sh\n");
    script.push_str(&format!(
        "# Generated by {} for {}. Do not edit; re-run to regenerate.\n",
        args.generator, args.command_name
    ));
    script.push_str("set -eu\n");
    match args.isolated_module {
        Some(module) => {
            script.push_str("script_dir=$(CDPATH= cd -- \"$(dirname -- \"$0\")\" && pwd)\n");
            script.push_str(&format!(
                "exec go tool -modfile=\"$script_dir\"/{} {} \"$@\"\n",
                shell_words::quote(module),
                package
            ));
        }
        None => {
            script.push_str(&format!("exec go tool {package} \"$@\"\n"));
        }
    }
    script
}

/// Writes the launcher to `path`, replacing any previous version, and marks it executable.
pub fn write_script(path: &Path, args: &ScriptArgs<'_>) -> Result<(), FsError> {
    let mut options = OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(crate::libs::paths::UNIX_EXECUTABLE_FILE_PERMISSIONS);
    }

    let mut file = options
        .open(path)
        .map_err(|source| FsError::new("open script file", path, source))?;
    file.write_all(render(args).as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| FsError::new("write to script file", path, source))?;
    drop(file);

    make_executable(path).map_err(|source| FsError::new("make executable", path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(isolated_module: Option<&'static str>) -> ScriptArgs<'static> {
        ScriptArgs {
            package_path: "golang.org/x/tools/cmd/goimports@latest",
            command_name: "goimports",
            isolated_module,
            generator: "add-direnv-gotool",
        }
    }

    #[test]
    fn shared_module_script_runs_go_tool_directly() {
        let script = render(&args(None));
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.ends_with("exec go tool golang.org/x/tools/cmd/goimports \"$@\"\n"));
        assert!(!script.contains("-modfile"));
    }

    #[test]
    fn isolated_script_points_at_sibling_modfile() {
        let script = render(&args(Some("goimports.mod")));
        assert!(script.contains(
            "exec go tool -modfile=\"$script_dir\"/goimports.mod golang.org/x/tools/cmd/goimports \"$@\"\n"
        ));
    }

    #[test]
    fn awkward_values_are_quoted() {
        let script = render(&ScriptArgs {
            package_path: "example.com/it's/tool",
            command_name: "tool",
            isolated_module: Some("my tool.mod"),
            generator: "add-direnv-gotool",
        });
        assert!(script.contains("'my tool.mod'"), "{script}");
        assert!(script.contains(&*shell_words::quote("example.com/it's/tool")), "{script}");
    }

    #[test]
    fn version_selector_is_not_passed_to_go_tool() {
        assert_eq!(tool_package("github.com/magefile/mage@v1.15.0"), "github.com/magefile/mage");
        assert_eq!(tool_package("github.com/magefile/mage"), "github.com/magefile/mage");
    }

    #[test]
    fn write_script_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goimports");
        fs::write(&path, "stale contents that are much longer than the new script body ".repeat(20))
            .unwrap();
        write_script(&path, &args(None)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render(&args(None)));
    }

    #[cfg(unix)]
    #[test]
    fn write_script_marks_file_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goimports");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        write_script(&path, &args(None)).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
