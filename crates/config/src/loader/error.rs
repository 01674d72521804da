//! Error types for configuration loading.
//!
//! Invariants:
//! - Every variant names the variable or path involved.
//! - Token file errors never include the file contents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Unable to determine the home directory; set PROFILER_CFG and PROFILER_PROFILES_FOLDER")]
    HomeDirUnavailable,

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read Consul token file at {path}")]
    TokenFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },
}
