//! Error types for the profile store adapters.

use std::path::PathBuf;
use thiserror::Error;

use profiler_config::BackendKind;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while reading or writing a profile backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The profile (or parameter) does not exist in this backend.
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Stored content could not be decoded.
    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    /// The backend could not be reached (connection refused, DNS, timeout).
    #[error("Backend unavailable at {url}: {message}")]
    Unavailable { url: String, message: String },

    /// Non-success response from a remote backend.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// A check-and-set write lost against a concurrent writer.
    #[error("Profile '{0}' was modified concurrently; run the command again")]
    Conflict(String),

    /// Local filesystem failure.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request error not covered by a more specific variant.
    #[error("HTTP error: {0}")]
    HttpError(#[source] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Profile name that cannot be used as a file name or key path.
    #[error("Invalid profile name '{0}': must be non-empty and contain no '/', whitespace or leading '.'")]
    InvalidName(String),

    /// Variable that the backend encoding cannot represent.
    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    /// AWS credentials missing from the environment.
    #[error("Missing AWS credentials: {0} is not set")]
    MissingCredentials(&'static str),

    /// Backend selected but not configured.
    #[error("The {0} backend is not configured")]
    NotConfigured(BackendKind),

    /// Request signing failed.
    #[error("Failed to sign request: {0}")]
    Signing(String),
}

impl ClientError {
    /// Check if this error means the profile is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error means the backend could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub(crate) fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_connect() || err.is_timeout() {
            Self::Unavailable {
                url,
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                context: format!("response from {url}"),
                message: err.to_string(),
            }
        } else {
            Self::HttpError(err)
        }
    }
}
