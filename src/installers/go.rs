// This module provides the Go toolchain side of the installation:
// checking whether the project is a Go module, creating an isolated
// module file for a single tool, and recording the tool with `go get -tool`.
//
// Everything here shells out to the `go` executable; failures surface the
// toolchain's own diagnostic text.

use crate::libs::errors::{CollaboratorError, FsError, GoError};
use crate::libs::process;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

const MODULE_EXTENSION: &str = "mod";

/// Options for [`GoToolchain::get_tool`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoGetToolOpts {
    /// Package path handed to `go get -tool`, version selector included.
    pub package_path: String,
    /// Dedicated module file to record the tool in instead of the project's `go.mod`.
    pub module_filepath: Option<PathBuf>,
}

/// The parts of the Go toolchain the installer relies on.
pub trait GoToolchain {
    /// Whether `dir` belongs to a Go module.
    fn check_in_module(&self, dir: &Path) -> Result<bool, GoError>;

    /// Creates a fresh module file at `module_filepath` named `module_name`.
    /// An existing file is left untouched.
    fn create_isolated_module(&self, module_filepath: &Path, module_name: &str)
    -> Result<(), GoError>;

    /// Fetches the tool and records it as a `tool` directive.
    fn get_tool(&self, opts: &GoGetToolOpts) -> Result<(), GoError>;
}

/// The real `go` executable.
#[derive(Debug, Clone)]
pub struct GoCli {
    program: OsString,
}

impl GoCli {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GoModInfo {
    #[serde(rename = "Module", default)]
    module: GoModModule,
}

#[derive(Debug, Default, Deserialize)]
struct GoModModule {
    #[serde(rename = "Path", default)]
    path: String,
}

/// Reads the module path out of `go mod edit -json` output and reports whether it is set.
fn has_module_path(json: &[u8]) -> Result<bool, serde_json::Error> {
    let info: GoModInfo = serde_json::from_slice(json)?;
    Ok(!info.module.path.trim().is_empty())
}

/// `go mod edit` outside a module exits non-zero with one of these diagnostics.
fn reports_missing_module(stderr: &str) -> bool {
    stderr.contains("go.mod file not found") || stderr.contains("cannot find main module")
}

impl GoToolchain for GoCli {
    fn check_in_module(&self, dir: &Path) -> Result<bool, GoError> {
        tracing::debug!(dir = %dir.display(), "check in module");
        match process::run(&self.program, &["mod", "edit", "-json"], Some(dir)) {
            Ok(output) => Ok(has_module_path(&output.stdout)?),
            Err(CollaboratorError::Failed { stderr, .. })
                if reports_missing_module(&stderr) =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn create_isolated_module(
        &self,
        module_filepath: &Path,
        module_name: &str,
    ) -> Result<(), GoError> {
        tracing::debug!(
            module.filename = %module_filepath.display(),
            module.name = module_name,
            "attempting to create isolated module"
        );
        if module_exists(module_filepath)? {
            tracing::debug!(
                module.filename = %module_filepath.display(),
                module.name = module_name,
                "isolated module already exists"
            );
            return Ok(());
        }

        let mut modfile_flag = OsString::from("--modfile=");
        modfile_flag.push(module_filepath);
        let args: [&OsStr; 4] = [
            OsStr::new("mod"),
            OsStr::new("init"),
            &modfile_flag,
            OsStr::new(module_name),
        ];
        process::run(&self.program, &args, None)?;
        Ok(())
    }

    fn get_tool(&self, opts: &GoGetToolOpts) -> Result<(), GoError> {
        tracing::debug!(
            opts.module_filepath = ?opts.module_filepath,
            opts.package_path = %opts.package_path,
            "using go get to capture tool"
        );
        process::run(&self.program, &get_tool_args(opts), None)?;
        Ok(())
    }
}

fn module_exists(module_filepath: &Path) -> Result<bool, FsError> {
    match module_filepath.try_exists() {
        Ok(exists) => Ok(exists),
        Err(source) => Err(FsError::new("stat", module_filepath, source)),
    }
}

/// Arguments for `go get -tool`, in the order the toolchain expects them.
pub fn get_tool_args(opts: &GoGetToolOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["get".into(), "-tool".into()];
    if let Some(modfile) = &opts.module_filepath {
        let mut flag = OsString::from("--modfile=");
        flag.push(modfile);
        args.push(flag);
    }
    args.push(opts.package_path.clone().into());
    args
}

/// Path of the isolated module file for `module_name` inside `dir`.
///
/// `.mod` is appended unless the name already carries that extension in any
/// letter case; a caller-supplied `tool.MOD` is kept as-is.
pub fn mod_filename(dir: &Path, module_name: &str) -> Result<PathBuf, GoError> {
    let module_name = module_name.trim();
    if module_name.is_empty() {
        return Err(GoError::EmptyModuleName);
    }

    let has_extension = Path::new(module_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MODULE_EXTENSION));
    let filename = if has_extension {
        module_name.to_string()
    } else {
        format!("{module_name}.{MODULE_EXTENSION}")
    };
    Ok(dir.join(filename))
}
