//! `profiler use` and the bare `profiler` invocation.
//!
//! Responsibilities:
//! - Resolve and merge the sources for the current directory.
//! - Hand the merged environment to the activation engine.
//!
//! Invariants:
//! - On success the process is replaced and this function does not return.

use anyhow::{Context, Result};
use profiler_config::Config;
use profiler_engine::{ActivationEngine, ActivationSettings, ProfileService};

pub async fn run(config: Config, name: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let settings = ActivationSettings::from_config(&config, &cwd);
    let service = ProfileService::new(config);

    let env = service
        .prepare_activation(name, &cwd)
        .await
        .with_context(|| match name {
            Some(name) => format!("Failed to resolve profile '{name}'"),
            None => "Failed to resolve the current directory's environment".to_string(),
        })?;

    ActivationEngine::system(settings)
        .activate(&env)
        .context("Activation failed")
}
