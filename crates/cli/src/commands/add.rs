//! `profiler add`.

use anyhow::{Context, Result};
use profiler_config::{BackendKind, Config};
use profiler_engine::ProfileService;
use tracing::info;

use crate::args::{OutputFormat, parse_entry};
use crate::formatters::{AddOutput, get_formatter};

pub async fn run(
    config: Config,
    name: &str,
    key: Option<String>,
    value: Option<String>,
    backend: Option<BackendKind>,
    output: OutputFormat,
) -> Result<()> {
    let entry = parse_entry(key, value)?;
    info!("Adding to profile: {}", name);
    let service = ProfileService::new(config);

    let report = service
        .add(
            name,
            entry.as_ref().map(|(k, v)| (k.as_str(), v.as_str())),
            backend,
        )
        .await
        .with_context(|| format!("Failed to add to profile '{name}'"))?;

    let out = AddOutput::new(name, entry.as_ref().map(|(k, _)| k.as_str()), &report);
    super::print_output(&get_formatter(output).format_add(&out)?)
}
