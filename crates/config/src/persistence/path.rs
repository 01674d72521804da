//! Path helpers for configuration file locations.
//!
//! Responsibilities:
//! - Determine the home directory via the `directories` crate.
//! - Determine the default config file path (`~/.profiler_cfg.yml`).
//! - Expand a leading `~` in user-supplied paths.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CONFIG_FILE_NAME;
use crate::loader::ConfigError;

/// Returns the current user's home directory.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Returns the default path to the configuration file: `~/.profiler_cfg.yml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?.join(DEFAULT_CONFIG_FILE_NAME))
}

/// Expand a leading `~` (alone or followed by a separator) to the home directory.
///
/// `~user` forms are left untouched.
pub fn expand_tilde(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut components = path.components();
    match components.next() {
        Some(std::path::Component::Normal(first)) if first == "~" => {
            Ok(home_dir()?.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}
