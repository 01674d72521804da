//! Profile resolution and activation.
//!
//! This crate turns a profile name into a running shell: it resolves the name
//! through the registry, fetches the profile from its backend, merges it with
//! the ambient files of the working directory and applies the result.

pub mod activation;
pub mod error;
pub mod merge;
pub mod service;
pub mod sources;

pub use activation::{
    ActivationEngine, ActivationSettings, ExecReplacer, KubectlNamespaceHook, NamespaceHook,
    ProcessReplacer, render_record, resolve_shell,
};
pub use error::{EngineError, Result};
pub use merge::merge_sources;
pub use service::{AddReport, BackendListing, ProfileKeys, ProfileService};
pub use sources::{
    Source, SourceOrigin, discover_ambient_sources, read_activation_record, read_shell_file,
};
