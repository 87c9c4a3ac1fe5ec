mod cli;
mod commands;
mod installers;
mod libs;
mod logger;

use clap::Parser;
use cli::args::Cli;
use colored::Colorize;
use commands::install;
use libs::errors::ArgumentError;
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_BINARY_NAME: &str = "add-direnv-gotool";

/// Name this process was invoked as, used to sign the edits it makes.
fn binary_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_BINARY_NAME.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.debug);

    match install::run(&cli, &binary_name()) {
        Ok(installed) => {
            tracing::info!("success");
            println!(
                "{} {}",
                "Installed".bright_green().bold(),
                installed.script_path.display().to_string().cyan()
            );
            if let Some(modfile) = &installed.module_filepath {
                println!(
                    "{} {}",
                    "Module file".bright_green().bold(),
                    modfile.display().to_string().cyan()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Argument problems are the user's to fix; the chain would only add noise.
            match err.downcast_ref::<ArgumentError>() {
                Some(argument) => tracing::error!("{}", argument.message),
                None => tracing::error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
