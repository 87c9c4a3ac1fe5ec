use crate::libs::paths::DEFAULT_TOOLS_SUBDIRECTORY;
use clap::Parser;

/// Defines the command-line interface (CLI) for 'add-direnv-gotool'.
/// `#[derive(Parser)]` automatically generates argument parsing code via `clap`.
#[derive(Debug, Parser)]
#[command(name = "add-direnv-gotool")]
#[command(version, about = "Install a Go tool into a direnv-managed project and put it on PATH")]
#[command(override_usage = "add-direnv-gotool [--isolate-module] [--command-name=value] [package-path]")]
pub struct Cli {
    /// Package path handed to `go get -tool`, e.g. golang.org/x/tools/cmd/goimports@latest.
    #[arg(value_name = "PACKAGE_PATH", num_args = 0..)]
    pub package_paths: Vec<String>,

    /// Name of the command on PATH. Derived from the package path when omitted.
    #[arg(long, value_name = "NAME")]
    pub command_name: Option<String>,

    /// Create a dedicated modfile for the 'go tool' to use.
    #[arg(long)]
    pub isolate_module: bool,

    /// Subdirectory (relative to the `.envrc`) that holds the launchers and modfiles.
    #[arg(
        short = 'd',
        long,
        hide = true,
        env = "ADD_DIRENV_GOTOOL_TOOLS_DIR",
        default_value = DEFAULT_TOOLS_SUBDIRECTORY
    )]
    pub tools_directory_name: String,

    /// Enables detailed debug output for troubleshooting.
    #[arg(long, env = "ADD_DIRENV_GOTOOL_DEBUG")]
    pub debug: bool,

    /// The `go` executable to drive.
    #[arg(long, hide = true, env = "ADD_DIRENV_GOTOOL_GO", default_value = "go")]
    pub go_bin: String,

    /// The `direnv` executable to query.
    #[arg(long, hide = true, env = "ADD_DIRENV_GOTOOL_DIRENV", default_value = "direnv")]
    pub direnv_bin: String,
}
