// Orchestrates a single installation:
// resolve settings -> create the tools directory -> (isolated module) ->
// `go get -tool` -> make sure `.envrc` has `PATH_add <tools-dir>` -> write the launcher.
//
// Every step is fail-fast. Errors are returned to `main`, which decides how
// to present them and terminates the process.

use crate::cli::args::Cli;
use crate::installers::direnv::{Direnv, EnvironmentManager};
use crate::installers::go::{GoCli, GoGetToolOpts, GoToolchain, mod_filename};
use crate::libs::command_name::derive_command_name;
use crate::libs::envrc::{EnsureOutcome, ensure_line, path_add_line};
use crate::libs::errors::{ArgumentError, DirenvError, FsError};
use crate::libs::paths::{DEFAULT_TOOLS_SUBDIRECTORY, create_tools_directory, tools_directory};
use crate::libs::script::{ScriptArgs, write_script};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything one run needs, resolved from the command line and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Name this binary was invoked as; written into the `.envrc` header.
    pub binary_name: String,
    /// Directory containing the `.envrc`.
    pub main_directory: PathBuf,
    pub envrc_path: PathBuf,
    /// Tools directory, relative to `main_directory`.
    pub tools_subdirectory_name: String,
    pub package_path: String,
    pub command_name: String,
    pub isolate_module: bool,
}

/// What [`execute`] produced, for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub script_path: PathBuf,
    pub module_filepath: Option<PathBuf>,
    pub envrc: EnsureOutcome,
}

/// Validates the arguments and asks the collaborators about the working tree.
pub fn resolve_settings(
    cli: &Cli,
    binary_name: &str,
    current_directory: &Path,
    direnv: &dyn EnvironmentManager,
    go: &dyn GoToolchain,
) -> Result<Settings> {
    let [package_path] = cli.package_paths.as_slice() else {
        return Err(ArgumentError::new("a single package path must be provided").into());
    };

    let tools_subdirectory_name = match cli.tools_directory_name.trim() {
        "" => DEFAULT_TOOLS_SUBDIRECTORY.to_string(),
        name if Path::new(name).is_absolute() => {
            return Err(ArgumentError::new(
                "the tools directory must be relative to the directory holding .envrc",
            )
            .into());
        }
        name => name.to_string(),
    };

    let envrc_path = match direnv.find_envrc() {
        Ok(path) => path,
        Err(DirenvError::NotManaged) => {
            return Err(
                ArgumentError::new("tool must be executed in project managed by direnv").into(),
            );
        }
        Err(err) => {
            return Err(err)
                .context("something went wrong while attempting to interface with direnv");
        }
    };
    let main_directory = envrc_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let package_path = package_path.trim().to_string();
    let command_name = match cli.command_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derive_command_name(&package_path).ok_or_else(|| {
            ArgumentError::new(
                "could not determine command-name from package path, adjust the package path or use the --command-name flag",
            )
        })?,
    };

    let mut isolate_module = cli.isolate_module;
    let in_module = go
        .check_in_module(current_directory)
        .context("could not determine if current directory is within a go module")?;
    if !in_module {
        tracing::debug!("project is not a golang module, forcing isolated module usage");
        isolate_module = true;
    }

    let settings = Settings {
        binary_name: binary_name.to_string(),
        main_directory,
        envrc_path,
        tools_subdirectory_name,
        package_path,
        command_name,
        isolate_module,
    };
    tracing::debug!(?settings, "operation settings determined");
    Ok(settings)
}

/// Performs the installation described by `settings`.
pub fn execute(settings: &Settings, go: &dyn GoToolchain) -> Result<Installed> {
    let tools_dir = tools_directory(&settings.main_directory, &settings.tools_subdirectory_name);
    create_tools_directory(&tools_dir).context("could not create go tools directory")?;

    let mut opts = GoGetToolOpts {
        package_path: settings.package_path.clone(),
        module_filepath: None,
    };

    if settings.isolate_module {
        let module_filepath = mod_filename(&tools_dir, &settings.command_name)
            .context("could not determine module name")?;
        go.create_isolated_module(&module_filepath, &settings.command_name)
            .context("could not create isolated go tool module")?;
        opts.module_filepath = Some(module_filepath);
    }

    tracing::info!(package = %settings.package_path, "fetching tool");
    go.get_tool(&opts)
        .context("could not `go get -tool` the package")?;

    let target_line = path_add_line(&settings.tools_subdirectory_name);
    let envrc = ensure_line(&settings.envrc_path, &target_line, &settings.binary_name)
        .context("could not handle .envrc")?;
    match envrc {
        EnsureOutcome::Appended => tracing::info!(
            envrc = %settings.envrc_path.display(),
            line = %target_line,
            "added tools directory to .envrc"
        ),
        EnsureOutcome::AlreadyPresent => tracing::debug!(
            envrc = %settings.envrc_path.display(),
            "tools directory already on .envrc PATH"
        ),
    }

    let script_path = tools_dir.join(&settings.command_name);
    let module_filename = opts
        .module_filepath
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());
    write_script(
        &script_path,
        &ScriptArgs {
            package_path: &settings.package_path,
            command_name: &settings.command_name,
            isolated_module: module_filename.as_deref(),
            generator: &settings.binary_name,
        },
    )
    .context("could not handle script generation")?;

    Ok(Installed {
        script_path,
        module_filepath: opts.module_filepath,
        envrc,
    })
}

/// Entry point used by `main`: wires the real collaborators and runs both phases.
pub fn run(cli: &Cli, binary_name: &str) -> Result<Installed> {
    let direnv = Direnv::new(&cli.direnv_bin);
    let go = GoCli::new(&cli.go_bin);
    let current_directory = std::env::current_dir()
        .map_err(|source| FsError::new("get", "current directory", source))?;

    let settings = resolve_settings(cli, binary_name, &current_directory, &direnv, &go)?;
    execute(&settings, &go)
}
