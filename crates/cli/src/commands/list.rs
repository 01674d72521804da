//! `profiler list`.

use anyhow::{Context, Result};
use profiler_config::Config;
use profiler_engine::ProfileService;
use tracing::info;

use crate::args::OutputFormat;
use crate::formatters::get_formatter;

pub async fn run(config: Config, output: OutputFormat) -> Result<()> {
    info!("Listing profiles");
    let listings = ProfileService::new(config)
        .list()
        .await
        .context("Failed to list profiles")?;
    super::print_output(&get_formatter(output).format_listings(&listings)?)
}
