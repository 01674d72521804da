//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Support loading from the config file, environment variables, and builder methods.
//! - Build the final `Config`, filling defaults relative to the home directory.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Config file parsing (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over config file values.
//! - Builder methods take precedence over environment variables.
//! - A leading `~` in any configured path is expanded against the home directory.
//! - The Consul token file is only read when no inline token is set.

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::env::{apply_env, env_var_or_none};
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{
    DEFAULT_PROFILES_FOLDER_NAME, DEFAULT_REPOSITORY_FILE_NAME, FALLBACK_SHELL, MAX_TIMEOUT_SECS,
};
use crate::persistence::{expand_tilde, home_dir};
use crate::types::{Config, ConsulConfig, NamespaceHookConfig, SsmConfig, default_timeout};

/// Configuration loader that builds config from the config file and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    profiles_folder: Option<PathBuf>,
    repository_path: Option<PathBuf>,
    shell: Option<String>,
    preserve_profile: Option<bool>,
    namespace_hook_enabled: Option<bool>,
    namespace_key: Option<String>,
    ssm_enabled: Option<bool>,
    ssm_region: Option<String>,
    ssm_parameter_tier: Option<String>,
    ssm_endpoint: Option<String>,
    consul_address: Option<String>,
    consul_token: Option<SecretString>,
    consul_token_file: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the config file path. Takes precedence over `PROFILER_CFG`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read configuration from the config file.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    ///
    /// Environment variables take precedence over config file settings.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the folder holding local profiles.
    pub fn with_profiles_folder(mut self, folder: PathBuf) -> Self {
        self.profiles_folder = Some(folder);
        self
    }

    /// Set the registry file path.
    pub fn with_repository_path(mut self, path: PathBuf) -> Self {
        self.repository_path = Some(path);
        self
    }

    /// Set the shell to exec on activation.
    pub fn with_shell(mut self, shell: String) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Set whether the activation record is kept.
    pub fn with_preserve_profile(mut self, preserve: bool) -> Self {
        self.preserve_profile = Some(preserve);
        self
    }

    /// Set the Consul address.
    pub fn with_consul_address(mut self, address: String) -> Self {
        self.consul_address = Some(address);
        self
    }

    /// Set the SSM endpoint override.
    pub fn with_ssm_endpoint(mut self, endpoint: String) -> Self {
        self.ssm_endpoint = Some(endpoint);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let timeout = self.timeout.unwrap_or_else(default_timeout);
        validate_timeout(timeout)?;

        let profiles_folder = match self.profiles_folder {
            Some(folder) => expand_tilde(&folder)?,
            None => home_dir()?.join(DEFAULT_PROFILES_FOLDER_NAME),
        };

        let repository_path = match self.repository_path {
            Some(path) => expand_tilde(&path)?,
            None => profiles_folder.join(DEFAULT_REPOSITORY_FILE_NAME),
        };

        let shell = self
            .shell
            .or_else(|| env_var_or_none("SHELL"))
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());

        let defaults = NamespaceHookConfig::default();
        let namespace_hook = NamespaceHookConfig {
            enabled: self.namespace_hook_enabled.unwrap_or(defaults.enabled),
            key: self.namespace_key.unwrap_or(defaults.key),
        };

        let ssm_defaults = SsmConfig::default();
        let ssm = SsmConfig {
            enabled: self.ssm_enabled.unwrap_or(ssm_defaults.enabled),
            region: self.ssm_region.unwrap_or(ssm_defaults.region),
            parameter_tier: self
                .ssm_parameter_tier
                .unwrap_or(ssm_defaults.parameter_tier),
            endpoint: self.ssm_endpoint,
        };

        let consul = match self.consul_address {
            Some(address) => {
                let token = match (self.consul_token, self.consul_token_file) {
                    (Some(token), _) => Some(token),
                    (None, Some(path)) => Some(read_token_file(&expand_tilde(&path)?)?),
                    (None, None) => None,
                };
                Some(ConsulConfig { address, token })
            }
            None => None,
        };

        Ok(Config {
            profiles_folder,
            repository_path,
            shell,
            preserve_profile: self.preserve_profile.unwrap_or(true),
            namespace_hook,
            ssm,
            consul,
            timeout,
        })
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_profiles_folder(&mut self, folder: Option<PathBuf>) {
        self.profiles_folder = folder;
    }

    pub(crate) fn set_repository_path(&mut self, path: Option<PathBuf>) {
        self.repository_path = path;
    }

    pub(crate) fn set_shell(&mut self, shell: Option<String>) {
        self.shell = shell;
    }

    pub(crate) fn set_preserve_profile(&mut self, preserve: Option<bool>) {
        self.preserve_profile = preserve;
    }

    pub(crate) fn set_namespace_hook_enabled(&mut self, enabled: Option<bool>) {
        self.namespace_hook_enabled = enabled;
    }

    pub(crate) fn set_namespace_key(&mut self, key: Option<String>) {
        self.namespace_key = key;
    }

    pub(crate) fn set_ssm_enabled(&mut self, enabled: Option<bool>) {
        self.ssm_enabled = enabled;
    }

    pub(crate) fn set_ssm_region(&mut self, region: Option<String>) {
        self.ssm_region = region;
    }

    pub(crate) fn set_ssm_parameter_tier(&mut self, tier: Option<String>) {
        self.ssm_parameter_tier = tier;
    }

    pub(crate) fn set_ssm_endpoint(&mut self, endpoint: Option<String>) {
        self.ssm_endpoint = endpoint;
    }

    pub(crate) fn set_consul_address(&mut self, address: Option<String>) {
        self.consul_address = address;
    }

    pub(crate) fn set_consul_token(&mut self, token: Option<SecretString>) {
        self.consul_token = token;
    }

    pub(crate) fn set_consul_token_file(&mut self, path: Option<PathBuf>) {
        self.consul_token_file = path;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

fn read_token_file(path: &Path) -> Result<SecretString, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SecretString::new(raw.trim().to_string().into()))
}
