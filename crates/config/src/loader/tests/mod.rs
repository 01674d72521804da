//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, cleared so the host environment cannot leak in.
pub fn cleared_vars() -> Vec<(&'static str, Option<&'static str>)> {
    [
        "PROFILER_CFG",
        "PROFILER_PROFILES_FOLDER",
        "PROFILER_REPOSITORY_PATH",
        "PROFILER_SHELL",
        "PROFILER_PRESERVE_PROFILE",
        "PROFILER_K8S_SWITCH_NAMESPACE",
        "PROFILER_NAMESPACE_KEY",
        "PROFILER_SSM_ENABLED",
        "PROFILER_SSM_REGION",
        "PROFILER_SSM_PARAMETER_TIER",
        "PROFILER_SSM_ENDPOINT",
        "PROFILER_CONSUL_ADDRESS",
        "PROFILER_CONSUL_TOKEN",
        "PROFILER_CONSUL_TOKEN_FILE",
        "PROFILER_TIMEOUT",
    ]
    .into_iter()
    .map(|var| (var, None))
    .collect()
}

/// `cleared_vars()` with the given overrides applied on top.
pub fn vars_with(
    overrides: &[(&'static str, &'static str)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut vars: Vec<_> = cleared_vars()
        .into_iter()
        .filter(|(k, _)| !overrides.iter().any(|(o, _)| o == k))
        .collect();
    vars.extend(overrides.iter().map(|(k, v)| (*k, Some(*v))));
    vars
}
