//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Normalize the `add` positional arguments into an optional `(key, value)` entry.
//! - Provide config path resolution helpers.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main()`).

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use profiler_client::check_exportable;
use profiler_config::BackendKind;
use std::path::{Path, PathBuf};

use crate::error::UsageError;

#[derive(Parser)]
#[command(name = "profiler")]
#[command(about = "Store environment variable profiles and start shells carrying them", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  profiler add demo FOO=bar\n  profiler add prod DB_HOST db.internal --backend consul\n  profiler use demo\n  profiler show demo prod\n  profiler list -o json\n  profiler\n"
)]
pub struct Cli {
    /// Path to a custom configuration file (overrides ~/.profiler_cfg.yml).
    #[arg(long, global = true, env = "PROFILER_CFG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format for read commands
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// With no subcommand, activate the ambient files of the current directory.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a shell carrying a profile merged with the current directory's env files
    Use {
        /// Profile to activate; omit to reuse ./.profiler
        name: Option<String>,
    },

    /// Create a profile, or set one variable on it
    Add {
        /// Profile name
        name: String,

        /// Variable name, or KEY=VALUE
        key: Option<String>,

        /// Variable value
        value: Option<String>,

        /// Backend for a new profile (local, ssm, consul)
        #[arg(short, long)]
        backend: Option<BackendKind>,
    },

    /// Print the variable names of one or more profiles
    Show {
        /// Profile names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List profiles per backend
    List,

    /// Delete a profile from its backend and the registry
    Delete {
        /// Profile name
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Turn `add`'s positional `KEY [VALUE]` into an entry.
///
/// `KEY=VALUE` is accepted as one argument; a key with no value is a usage error.
/// Keys that could not be exported on activation are rejected in either form.
pub fn parse_entry(
    key: Option<String>,
    value: Option<String>,
) -> Result<Option<(String, String)>, UsageError> {
    let (key, value) = match (key, value) {
        (None, _) => return Ok(None),
        (Some(key), Some(value)) => (key, value),
        (Some(key), None) => match key.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => return Err(UsageError::MissingValue(key)),
        },
    };
    if key.is_empty() {
        return Err(UsageError::EmptyKey);
    }
    check_exportable(&key, &value).map_err(|issue| UsageError::Unexportable {
        key: key.clone(),
        issue,
    })?;
    Ok(Some((key, value)))
}

/// Returns true if the path is empty or contains only whitespace.
pub(crate) fn path_is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

/// Normalizes the config path, ignoring empty or whitespace-only values.
pub fn resolve_config_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !path_is_blank(p))
}
