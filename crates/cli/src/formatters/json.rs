//! JSON formatter implementation.

use anyhow::Result;
use profiler_engine::{BackendListing, ProfileKeys};

use crate::formatters::{AddOutput, DeleteOutput, Formatter};

/// Pretty-printed JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_profile_keys(&self, profiles: &[ProfileKeys]) -> Result<String> {
        Ok(serde_json::to_string_pretty(profiles)?)
    }

    fn format_listings(&self, listings: &[BackendListing]) -> Result<String> {
        Ok(serde_json::to_string_pretty(listings)?)
    }

    fn format_add(&self, output: &AddOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }

    fn format_delete(&self, output: &DeleteOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }
}
