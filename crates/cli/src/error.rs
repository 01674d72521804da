//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map library error variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-7 are reserved for specific error categories.
//! - clap's own argument errors also exit with 2.

use profiler_client::{ClientError, ExportIssue};
use profiler_config::{ConfigError, RegistryError};
use profiler_engine::EngineError;
use thiserror::Error;

/// Invalid command-line input detected after clap parsing.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Variable '{0}' has no value; use `profiler add <name> {0} <value>` or `{0}=<value>`")]
    MissingValue(String),

    #[error("Variable name must not be empty")]
    EmptyKey,

    #[error("Variable {key:?} cannot be exported: {issue}")]
    Unexportable { key: String, issue: ExportIssue },
}

/// Structured exit codes for profiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Usage or validation error - bad arguments, invalid names, bad configuration.
    ///
    /// Scripts should fix the input and not retry.
    UsageError = 2,

    /// Backend unavailable - connection refused, DNS, timeout, HTTP 5xx gateway errors.
    ///
    /// Scripts may retry later.
    Unavailable = 3,

    /// Profile not registered or missing from its backend.
    NotFound = 4,

    /// Profile already exists under another backend, or a concurrent write won.
    AlreadyExists = 5,

    /// Stored or ambient content could not be decoded.
    DecodeError = 6,

    /// The shell could not be located or executed.
    ExecFailed = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => ExitCode::NotFound,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::Unavailable { .. } => ExitCode::Unavailable,
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::Unavailable,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::Unavailable
            }

            ClientError::Conflict(_) => ExitCode::AlreadyExists,
            ClientError::Decode { .. } => ExitCode::DecodeError,

            ClientError::InvalidUrl(_)
            | ClientError::InvalidName(_)
            | ClientError::InvalidVariable(_)
            | ClientError::MissingCredentials(_)
            | ClientError::NotConfigured(_) => ExitCode::UsageError,

            ClientError::ApiError { .. }
            | ClientError::HttpError(_)
            | ClientError::Io { .. }
            | ClientError::Signing(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&EngineError> for ExitCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::NotRegistered(_) => ExitCode::NotFound,
            EngineError::AlreadyExists { .. } => ExitCode::AlreadyExists,
            EngineError::Client(inner) => ExitCode::from(inner),
            EngineError::Registry(RegistryError::Parse { .. }) => ExitCode::DecodeError,
            EngineError::Registry(_) => ExitCode::GeneralError,
            EngineError::SourceParse { .. } => ExitCode::DecodeError,
            EngineError::InvalidVariable { .. } => ExitCode::UsageError,
            EngineError::SourceRead { .. } | EngineError::Record { .. } => ExitCode::GeneralError,
            EngineError::ShellNotFound(_) | EngineError::Exec { .. } => ExitCode::ExecFailed,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<EngineError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
            if cause.downcast_ref::<UsageError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
            {
                return ExitCode::UsageError;
            }
            if let Some(RegistryError::Parse { .. }) = cause.downcast_ref::<RegistryError>() {
                return ExitCode::DecodeError;
            }
        }
        ExitCode::GeneralError
    }
}
