//! Backend dispatch over the three profile stores.
//!
//! Responsibilities:
//! - Construct the store for a `BackendKind` from configuration.
//! - Expose the uniform profile operations, dispatched by exhaustive match.
//! - Validate profile names before they reach a file name or key path.
//! - Validate variables before they are written to any backend.
//!
//! Does NOT handle:
//! - The registry (the caller decides which backend a name lives in).
//! - Merging with ambient sources (see `profiler-engine`).

mod consul;
mod local;
mod ssm;

pub use consul::ConsulStore;
pub use local::LocalStore;
pub use ssm::SsmStore;

use std::time::Duration;

use profiler_config::constants::DEFAULT_MAX_REDIRECTS;
use profiler_config::{BackendKind, Config};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::sigv4::AwsCredentials;
use crate::variables::{SetOutcome, Variables, check_exportable};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The profile did not exist and was created.
    pub created: bool,
    /// Effect on the requested key, when one was given.
    pub change: Option<SetOutcome>,
}

impl UpsertOutcome {
    /// Whether the backend must be written.
    pub fn is_write_needed(&self) -> bool {
        self.created || self.change.is_some_and(SetOutcome::is_change)
    }
}

/// Reject names that would escape the profiles folder or split a key path.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.chars().any(char::is_whitespace);
    if invalid {
        return Err(ClientError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Reject a variable that could not be exported when the profile is activated.
pub fn validate_variable(key: &str, value: &str) -> Result<()> {
    check_exportable(key, value)
        .map_err(|issue| ClientError::InvalidVariable(format!("{key:?}: {issue}")))
}

/// Build the HTTP client shared by the remote stores.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
        .build()
        .map_err(ClientError::from)
}

/// A profile store for one backend.
#[derive(Debug, Clone)]
pub enum ProfileStore {
    Local(LocalStore),
    Ssm(SsmStore),
    Consul(ConsulStore),
}

impl ProfileStore {
    /// Open the store for `kind`.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` for Consul without `consulAddress`.
    /// - `MissingCredentials` for SSM without AWS credentials in the environment.
    pub fn open(kind: BackendKind, config: &Config) -> Result<Self> {
        debug!(backend = %kind, "Opening profile store");
        match kind {
            BackendKind::Local => Ok(Self::Local(LocalStore::new(&config.profiles_folder))),
            BackendKind::Ssm => {
                let credentials = AwsCredentials::from_env()?;
                let http = build_http_client(config.timeout)?;
                Ok(Self::Ssm(SsmStore::new(http, &config.ssm, credentials)))
            }
            BackendKind::Consul => {
                let consul = config
                    .consul
                    .as_ref()
                    .ok_or(ClientError::NotConfigured(BackendKind::Consul))?;
                let http = build_http_client(config.timeout)?;
                Ok(Self::Consul(ConsulStore::new(
                    http,
                    &consul.address,
                    consul.token.clone(),
                )))
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Local(_) => BackendKind::Local,
            Self::Ssm(_) => BackendKind::Ssm,
            Self::Consul(_) => BackendKind::Consul,
        }
    }

    /// True iff `name` is stored in this backend.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        validate_profile_name(name)?;
        match self {
            Self::Local(store) => store.exists(name),
            Self::Ssm(store) => store.exists(name).await,
            Self::Consul(store) => store.exists(name).await,
        }
    }

    /// Every profile name in this backend, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        match self {
            Self::Local(store) => store.list(),
            Self::Ssm(store) => store.list().await,
            Self::Consul(store) => store.list().await,
        }
    }

    /// All variables of `name`, in stored order. `NotFound` if absent.
    pub async fn fetch_variables(&self, name: &str) -> Result<Variables> {
        validate_profile_name(name)?;
        match self {
            Self::Local(store) => store.fetch_variables(name),
            Self::Ssm(store) => store.fetch_variables(name).await,
            Self::Consul(store) => store.fetch_variables(name).await,
        }
    }

    /// Create `name` if missing, then set `entry` if given.
    pub async fn upsert(&self, name: &str, entry: Option<(&str, &str)>) -> Result<UpsertOutcome> {
        validate_profile_name(name)?;
        if let Some((key, value)) = entry {
            validate_variable(key, value)?;
        }
        let outcome = match self {
            Self::Local(store) => store.upsert(name, entry),
            Self::Ssm(store) => store.upsert(name, entry).await,
            Self::Consul(store) => store.upsert(name, entry).await,
        }?;
        debug!(backend = %self.kind(), name, ?outcome, "Upserted profile");
        Ok(outcome)
    }

    /// Variable names of `name`, in stored order.
    pub async fn show_keys(&self, name: &str) -> Result<Vec<String>> {
        validate_profile_name(name)?;
        match self {
            Self::Local(store) => store.show_keys(name),
            Self::Ssm(store) => store.show_keys(name).await,
            Self::Consul(store) => store.show_keys(name).await,
        }
    }

    /// Remove the whole profile. `NotFound` if absent.
    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_profile_name(name)?;
        match self {
            Self::Local(store) => store.delete(name),
            Self::Ssm(store) => store.delete(name).await,
            Self::Consul(store) => store.delete(name).await,
        }
    }
}
