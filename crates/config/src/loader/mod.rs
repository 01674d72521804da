//! Configuration loader for the config file and environment variables.
//!
//! Responsibilities:
//! - Locate and parse the YAML config file (`PROFILER_CFG` or `~/.profiler_cfg.yml`).
//! - Apply `PROFILER_*` environment overrides on top of file values.
//! - Provide a builder-pattern `ConfigLoader` producing the final `Config`.
//!
//! Does NOT handle:
//! - Writing a default config file (a missing file simply means defaults).
//! - Registry persistence (see `persistence` module).
//!
//! Invariants / Assumptions:
//! - Builder methods > environment variables > config file > defaults.
//! - Empty or whitespace-only environment variables are treated as unset.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
