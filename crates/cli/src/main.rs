//! profiler - environment variable profiles across local, SSM and Consul backends.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load configuration and install logging.
//! - Dispatch to the command handlers and map failures to exit codes.
//!
//! Does NOT handle:
//! - Backend access, merging or activation (see `profiler-client` and `profiler-engine`).
//!
//! Invariants:
//! - Logs go to stderr so stdout carries only command output.
//! - `completions` never loads configuration.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use anyhow::{Context, Result};
use args::{Cli, Commands, resolve_config_path};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use profiler_config::{Config, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        return commands::completions::run(shell);
    }
    let config = load_config(&cli)?;
    run_command(cli, config).await
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = resolve_config_path(cli.config.clone()) {
        loader = loader.with_config_path(path);
    }
    loader
        .from_file()
        .context("Failed to load configuration file")?
        .from_env()
        .context("Failed to load configuration from environment")?
        .build()
        .context("Failed to build configuration")
}
