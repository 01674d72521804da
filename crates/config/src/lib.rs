//! Configuration management for profiler.
//!
//! This crate provides the configuration types and loader (config file plus
//! `PROFILER_*` environment overrides) and the persisted profile registry that
//! maps a profile name to the backend storing it.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{Registry, RegistryEntry, RegistryError};
pub use types::{
    BackendKind, Config, ConsulConfig, NamespaceHookConfig, ParseBackendKindError, SsmConfig,
};
