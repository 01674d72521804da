//! Centralized constants for the profiler workspace.
//!
//! Default values and well-known names shared across crates.

// =============================================================================
// File Locations
// =============================================================================

/// Config file name looked up in the home directory when `PROFILER_CFG` is unset.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".profiler_cfg.yml";

/// Folder (relative to home) holding local profile documents.
pub const DEFAULT_PROFILES_FOLDER_NAME: &str = ".profiles";

/// Registry file name, placed inside the profiles folder by default.
pub const DEFAULT_REPOSITORY_FILE_NAME: &str = ".repository.json";

/// Activation record written to the working directory on every activation.
pub const ACTIVATION_RECORD_FILE_NAME: &str = ".profiler";

// =============================================================================
// Activation Defaults
// =============================================================================

/// Shell used when neither the config nor `$SHELL` names one.
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Variable whose value drives the Kubernetes namespace switch.
pub const DEFAULT_NAMESPACE_KEY: &str = "K8S_NAMESPACE";

/// Synthetic variable written into every newly created profile.
pub const PROFILE_NAME_KEY: &str = "profile_name";

// =============================================================================
// Remote Backend Defaults
// =============================================================================

/// Prefix shared by every SSM parameter and Consul key owned by profiler.
pub const REMOTE_PREFIX: &str = "profiler";

/// Default AWS region for the SSM backend.
pub const DEFAULT_SSM_REGION: &str = "us-east-1";

/// Default SSM parameter tier.
pub const DEFAULT_SSM_PARAMETER_TIER: &str = "Standard";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed HTTP request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum number of HTTP redirects followed by the remote clients.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
