//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read `PROFILER_*` variables and apply them to a `ConfigLoader`.
//! - Provide `env_var_or_none` with empty/whitespace filtering.
//!
//! Invariants:
//! - Environment variables take precedence over config file values.
//! - Returned values are trimmed.
//! - Invalid booleans and numbers return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a boolean the way the config file spells it, plus `1`/`0`.
pub(crate) fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

fn bool_var(var: &str) -> Result<Option<bool>, ConfigError> {
    env_var_or_none(var)
        .map(|value| parse_bool(var, &value))
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(folder) = env_var_or_none("PROFILER_PROFILES_FOLDER") {
        loader.set_profiles_folder(Some(PathBuf::from(folder)));
    }
    if let Some(path) = env_var_or_none("PROFILER_REPOSITORY_PATH") {
        loader.set_repository_path(Some(PathBuf::from(path)));
    }
    if let Some(shell) = env_var_or_none("PROFILER_SHELL") {
        loader.set_shell(Some(shell));
    }
    if let Some(preserve) = bool_var("PROFILER_PRESERVE_PROFILE")? {
        loader.set_preserve_profile(Some(preserve));
    }
    if let Some(enabled) = bool_var("PROFILER_K8S_SWITCH_NAMESPACE")? {
        loader.set_namespace_hook_enabled(Some(enabled));
    }
    if let Some(key) = env_var_or_none("PROFILER_NAMESPACE_KEY") {
        loader.set_namespace_key(Some(key));
    }
    if let Some(enabled) = bool_var("PROFILER_SSM_ENABLED")? {
        loader.set_ssm_enabled(Some(enabled));
    }
    if let Some(region) = env_var_or_none("PROFILER_SSM_REGION") {
        loader.set_ssm_region(Some(region));
    }
    if let Some(tier) = env_var_or_none("PROFILER_SSM_PARAMETER_TIER") {
        loader.set_ssm_parameter_tier(Some(tier));
    }
    if let Some(endpoint) = env_var_or_none("PROFILER_SSM_ENDPOINT") {
        loader.set_ssm_endpoint(Some(endpoint));
    }
    if let Some(address) = env_var_or_none("PROFILER_CONSUL_ADDRESS") {
        loader.set_consul_address(Some(address));
    }
    if let Some(token) = env_var_or_none("PROFILER_CONSUL_TOKEN") {
        loader.set_consul_token(Some(SecretString::new(token.into())));
    }
    if let Some(path) = env_var_or_none("PROFILER_CONSUL_TOKEN_FILE") {
        loader.set_consul_token_file(Some(PathBuf::from(path)));
    }
    if let Some(timeout) = env_var_or_none("PROFILER_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "PROFILER_TIMEOUT".to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    Ok(())
}
