//! `profiler delete`.

use anyhow::{Context, Result};
use profiler_config::Config;
use profiler_engine::ProfileService;
use tracing::info;

use crate::args::OutputFormat;
use crate::formatters::{DeleteOutput, get_formatter};

pub async fn run(config: Config, name: &str, output: OutputFormat) -> Result<()> {
    info!("Deleting profile: {}", name);
    let backend = ProfileService::new(config)
        .delete(name)
        .await
        .with_context(|| format!("Failed to delete profile '{name}'"))?;
    let out = DeleteOutput {
        name: name.to_string(),
        backend,
    };
    super::print_output(&get_formatter(output).format_delete(&out)?)
}
