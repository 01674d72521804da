//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide text and JSON renderings of command results.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - JSON output is always a single valid document, even when empty.
//! - Text output never ends with a trailing newline; callers use `println!`.

use anyhow::Result;
use profiler_client::SetOutcome;
use profiler_config::BackendKind;
use profiler_engine::{AddReport, BackendListing, ProfileKeys};
use serde::Serialize;

use crate::args::OutputFormat;

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// What `add` did, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutput {
    pub name: String,
    pub backend: BackendKind,
    pub created: bool,
    pub registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<&'static str>,
}

impl AddOutput {
    pub fn new(name: &str, key: Option<&str>, report: &AddReport) -> Self {
        Self {
            name: name.to_string(),
            backend: report.backend,
            created: report.outcome.created,
            registered: report.registered,
            key: key.map(str::to_string),
            change: report.outcome.change.map(change_label),
        }
    }
}

fn change_label(outcome: SetOutcome) -> &'static str {
    match outcome {
        SetOutcome::Inserted => "inserted",
        SetOutcome::Unchanged => "unchanged",
        SetOutcome::Replaced => "replaced",
    }
}

/// What `delete` did, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutput {
    pub name: String,
    pub backend: BackendKind,
}

/// Renders command results.
pub trait Formatter {
    fn format_profile_keys(&self, profiles: &[ProfileKeys]) -> Result<String>;
    fn format_listings(&self, listings: &[BackendListing]) -> Result<String>;
    fn format_add(&self, output: &AddOutput) -> Result<String>;
    fn format_delete(&self, output: &DeleteOutput) -> Result<String>;
}

/// Formatter for the selected output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

#[cfg(test)]
mod tests;
