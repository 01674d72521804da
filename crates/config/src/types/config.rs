//! Runtime configuration consumed by the adapters and the activation engine.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    ACTIVATION_RECORD_FILE_NAME, DEFAULT_NAMESPACE_KEY, DEFAULT_SSM_PARAMETER_TIER,
    DEFAULT_SSM_REGION, DEFAULT_TIMEOUT_SECS,
};

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding local `.<name>.yml` profile documents.
    pub profiles_folder: PathBuf,
    /// JSON file backing the profile registry.
    pub repository_path: PathBuf,
    /// Shell executable the activation replaces the process with.
    pub shell: String,
    /// Keep the activation record after activation.
    pub preserve_profile: bool,
    /// Side-effect hook run for one special variable during activation.
    pub namespace_hook: NamespaceHookConfig,
    /// AWS SSM Parameter Store settings.
    pub ssm: SsmConfig,
    /// Consul KV settings; `None` when no address is configured.
    pub consul: Option<ConsulConfig>,
    /// HTTP request timeout for remote backends.
    pub timeout: Duration,
}

impl Config {
    /// Name of the activation record, relative to the working directory.
    pub fn activation_record_name(&self) -> &'static str {
        ACTIVATION_RECORD_FILE_NAME
    }
}

/// Kubernetes namespace switch performed when the hook key is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceHookConfig {
    pub enabled: bool,
    /// Variable name that triggers the hook.
    pub key: String,
}

impl Default for NamespaceHookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: DEFAULT_NAMESPACE_KEY.to_string(),
        }
    }
}

/// AWS SSM backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmConfig {
    /// Include SSM in `list`; adding to SSM works regardless.
    pub enabled: bool,
    pub region: String,
    /// `Standard`, `Advanced` or `Intelligent-Tiering`.
    pub parameter_tier: String,
    /// Endpoint override (LocalStack, tests). Defaults to the regional endpoint.
    pub endpoint: Option<String>,
}

impl Default for SsmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            region: DEFAULT_SSM_REGION.to_string(),
            parameter_tier: DEFAULT_SSM_PARAMETER_TIER.to_string(),
            endpoint: None,
        }
    }
}

impl SsmConfig {
    /// Endpoint requests are sent to.
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://ssm.{}.amazonaws.com", self.region),
        }
    }
}

/// Consul KV backend settings.
#[derive(Debug, Clone)]
pub struct ConsulConfig {
    /// Base address, e.g. `http://127.0.0.1:8500`.
    pub address: String,
    pub token: Option<SecretString>,
}

/// Default request timeout as a `Duration`.
pub(crate) fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}
