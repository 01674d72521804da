//! Config file loading.
//!
//! Responsibilities:
//! - Resolve the config file path (builder override, `PROFILER_CFG`, then `~/.profiler_cfg.yml`).
//! - Parse the YAML document and apply present keys to a `ConfigLoader`.
//!
//! Invariants:
//! - A missing config file leaves the loader untouched.
//! - Unknown keys are ignored so older binaries accept newer files.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::env::env_var_or_none;
use super::error::ConfigError;
use crate::persistence::{default_config_path, expand_tilde};

/// On-disk shape of the config file. Keys are camelCase.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ConfigFile {
    pub profiles_folder: Option<PathBuf>,
    pub repository_path: Option<PathBuf>,
    pub shell: Option<String>,
    pub preserve_profile: Option<bool>,
    pub k8s_switch_namespace: Option<bool>,
    pub namespace_key: Option<String>,
    pub ssm_enabled: Option<bool>,
    pub ssm_region: Option<String>,
    pub ssm_parameter_tier: Option<String>,
    pub ssm_endpoint: Option<String>,
    pub consul_address: Option<String>,
    pub consul_token: Option<String>,
    pub consul_token_file: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

/// Resolve the config file path for this loader.
pub(crate) fn resolve_config_path(loader: &ConfigLoader) -> Result<PathBuf, ConfigError> {
    if let Some(path) = loader.config_path() {
        return expand_tilde(path);
    }
    if let Some(path) = env_var_or_none("PROFILER_CFG") {
        return expand_tilde(&PathBuf::from(path));
    }
    default_config_path()
}

/// Apply config file values to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let path = resolve_config_path(loader)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file found, using defaults");
        return Ok(());
    }

    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.clone(),
        source,
    })?;

    // An empty document deserializes to null rather than an empty mapping.
    let file: ConfigFile = if raw.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::ConfigFileParse {
            path: path.clone(),
            source,
        })?
    };

    tracing::debug!(path = %path.display(), "Loaded config file");

    if file.profiles_folder.is_some() {
        loader.set_profiles_folder(file.profiles_folder);
    }
    if file.repository_path.is_some() {
        loader.set_repository_path(file.repository_path);
    }
    if let Some(shell) = file.shell.filter(|s| !s.trim().is_empty()) {
        loader.set_shell(Some(shell));
    }
    if file.preserve_profile.is_some() {
        loader.set_preserve_profile(file.preserve_profile);
    }
    if file.k8s_switch_namespace.is_some() {
        loader.set_namespace_hook_enabled(file.k8s_switch_namespace);
    }
    if file.namespace_key.is_some() {
        loader.set_namespace_key(file.namespace_key);
    }
    if file.ssm_enabled.is_some() {
        loader.set_ssm_enabled(file.ssm_enabled);
    }
    if file.ssm_region.is_some() {
        loader.set_ssm_region(file.ssm_region);
    }
    if file.ssm_parameter_tier.is_some() {
        loader.set_ssm_parameter_tier(file.ssm_parameter_tier);
    }
    if file.ssm_endpoint.is_some() {
        loader.set_ssm_endpoint(file.ssm_endpoint);
    }
    if file.consul_address.is_some() {
        loader.set_consul_address(file.consul_address);
    }
    if let Some(token) = file.consul_token {
        loader.set_consul_token(Some(SecretString::new(token.into())));
    }
    if file.consul_token_file.is_some() {
        loader.set_consul_token_file(file.consul_token_file);
    }
    if let Some(secs) = file.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    Ok(())
}
