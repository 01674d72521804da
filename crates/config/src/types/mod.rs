//! Configuration type definitions for profiler.
//!
//! Responsibilities:
//! - Define the runtime `Config` consumed by the adapters and the activation engine.
//! - Define `BackendKind`, the closed set of storage backends a profile can live in.
//!
//! Does NOT handle:
//! - Loading configuration from files or environment variables (see `loader` module).
//! - Registry persistence (see `persistence` module).
//!
//! Invariants:
//! - Secrets (Consul token) use `secrecy::SecretString` to prevent accidental logging.
//! - `BackendKind` serializes to the lowercase tags `local`, `ssm`, `consul`.

mod backend;
mod config;

pub use backend::{BackendKind, ParseBackendKindError};
pub use config::{Config, ConsulConfig, NamespaceHookConfig, SsmConfig};
pub(crate) use config::default_timeout;
