//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - A missing subcommand behaves like `use` without a profile name.

use anyhow::Result;
use profiler_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let output = cli.output;
    match cli.command {
        None => commands::activate::run(config, None).await?,
        Some(Commands::Use { name }) => commands::activate::run(config, name.as_deref()).await?,
        Some(Commands::Add {
            name,
            key,
            value,
            backend,
        }) => commands::add::run(config, &name, key, value, backend, output).await?,
        Some(Commands::Show { names }) => commands::show::run(config, &names, output).await?,
        Some(Commands::List) => commands::list::run(config, output).await?,
        Some(Commands::Delete { name }) => commands::delete::run(config, &name, output).await?,
        Some(Commands::Completions { shell }) => commands::completions::run(shell)?,
    }
    Ok(())
}
