use std::{env, path::PathBuf, str::FromStr};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::Parser;
use gasfee_core::{GasFeeConfig, load_env_from_project_path, setup_info_logger, setup_logger};
use tracing::level_filters::LevelFilter;

use crate::{
    cli_interface::{Cli, Commands},
    commands::{estimate, serve},
    console::print_error_message,
    error::CliError,
};

mod cli_interface;
mod commands;
mod console;
mod error;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    let path = match override_path {
        Some(path) => {
            PathBuf::from_str(path).map_err(|_| format!("Invalid path provided: '{}'", path))?
        }
        None => env::current_dir().map_err(|_| "Failed to get current directory.".to_string())?,
    };

    path.canonicalize().map_err(|e| format!("Failed to resolve path '{}': {}", path.display(), e))
}

fn load_config(path: &Option<String>) -> Result<GasFeeConfig, CliError> {
    let resolved_path = resolve_path(path).inspect_err(|e| print_error_message(e))?;
    load_env_from_project_path(&resolved_path);

    Ok(GasFeeConfig::from_env().inspect_err(|e| print_error_message(&e.to_string()))?)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match &cli.command {
        // keep stdout parseable
        Commands::Estimate(args) if args.json => setup_logger(LevelFilter::WARN),
        _ => setup_info_logger(),
    }

    match &cli.command {
        Commands::Serve(args) => {
            let config = load_config(&args.path)?;
            serve::handle_serve(args, config).await?;
        }
        Commands::Estimate(args) => {
            let config = load_config(&args.path)?;
            estimate::handle_estimate(args, config)
                .await
                .inspect_err(|e| print_error_message(&e.to_string()))?;
        }
    }

    Ok(())
}
