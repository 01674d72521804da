//! Error types for profile resolution and activation.

use std::path::PathBuf;
use thiserror::Error;

use profiler_client::{ClientError, ExportIssue};
use profiler_config::{BackendKind, RegistryError};

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while resolving, merging or activating a profile.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The registry has no entry for this name.
    #[error("Profile '{0}' is not registered; create it with `profiler add {0}`")]
    NotRegistered(String),

    /// The name is registered under a different backend than the one requested.
    #[error("Profile '{name}' already exists in the {registered} backend (requested {requested})")]
    AlreadyExists {
        name: String,
        registered: BackendKind,
        requested: BackendKind,
    },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An ambient source exists but cannot be read.
    #[error("Failed to read {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An ambient source is malformed. Never includes line contents.
    #[error("Failed to parse {path}: {message}")]
    SourceParse { path: PathBuf, message: String },

    /// A merged variable cannot be placed in the process environment.
    #[error("Cannot export variable {key:?}: {issue}")]
    InvalidVariable { key: String, issue: ExportIssue },

    /// Writing or removing the activation record failed.
    #[error("Failed to update activation record {path}")]
    Record {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured shell could not be located.
    #[error("Shell '{0}' not found on PATH")]
    ShellNotFound(String),

    /// Replacing the process with the shell failed.
    #[error("Failed to exec shell {shell}")]
    Exec {
        shell: String,
        #[source]
        source: std::io::Error,
    },
}
