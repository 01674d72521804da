//! `profiler show`.

use anyhow::{Context, Result};
use profiler_config::Config;
use profiler_engine::ProfileService;

use crate::args::OutputFormat;
use crate::formatters::get_formatter;

pub async fn run(config: Config, names: &[String], output: OutputFormat) -> Result<()> {
    let service = ProfileService::new(config);
    let mut profiles = Vec::with_capacity(names.len());
    for name in names {
        let keys = service
            .show(name)
            .await
            .with_context(|| format!("Failed to show profile '{name}'"))?;
        profiles.push(keys);
    }
    super::print_output(&get_formatter(output).format_profile_keys(&profiles)?)
}
