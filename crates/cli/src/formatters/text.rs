//! Plain text formatter implementation.
//!
//! Responsibilities:
//! - One name per line for `show` and `list`, with bracketed section headers
//!   when more than one section is printed.
//! - One-line confirmations for `add` and `delete`.

use anyhow::Result;
use profiler_config::BackendKind;
use profiler_engine::{BackendListing, ProfileKeys};

use crate::formatters::{AddOutput, DeleteOutput, Formatter};

/// Human-readable formatter.
pub struct TextFormatter;

fn section_title(backend: BackendKind) -> &'static str {
    match backend {
        BackendKind::Local => "Local Profiles",
        BackendKind::Consul => "Consul Remote Profiles",
        BackendKind::Ssm => "SSM Remote Profiles",
    }
}

impl Formatter for TextFormatter {
    fn format_profile_keys(&self, profiles: &[ProfileKeys]) -> Result<String> {
        let with_headers = profiles.len() > 1;
        let sections: Vec<String> = profiles
            .iter()
            .map(|profile| {
                let mut lines = Vec::with_capacity(profile.keys.len() + 1);
                if with_headers {
                    lines.push(format!("[{}]", profile.name));
                }
                lines.extend(profile.keys.iter().cloned());
                lines.join("\n")
            })
            .collect();
        Ok(sections.join("\n\n"))
    }

    fn format_listings(&self, listings: &[BackendListing]) -> Result<String> {
        let with_headers = listings.len() > 1;
        let sections: Vec<String> = listings
            .iter()
            .map(|listing| {
                let mut lines = Vec::with_capacity(listing.names.len() + 1);
                if with_headers {
                    lines.push(format!("[{}]", section_title(listing.backend)));
                }
                lines.extend(listing.names.iter().cloned());
                lines.join("\n")
            })
            .collect();
        Ok(sections.join("\n\n"))
    }

    fn format_add(&self, output: &AddOutput) -> Result<String> {
        let mut lines = Vec::new();
        if output.created {
            lines.push(format!(
                "Created profile '{}' in the {} backend",
                output.name, output.backend
            ));
        }
        if let (Some(key), Some(change)) = (&output.key, output.change) {
            let line = match change {
                "unchanged" => format!("{key} already set in '{}'", output.name),
                "replaced" => format!("Updated {key} in '{}'", output.name),
                _ => format!("Added {key} to '{}'", output.name),
            };
            lines.push(line);
        }
        if lines.is_empty() {
            lines.push(format!(
                "Profile '{}' already exists in the {} backend",
                output.name, output.backend
            ));
        }
        Ok(lines.join("\n"))
    }

    fn format_delete(&self, output: &DeleteOutput) -> Result<String> {
        Ok(format!(
            "Deleted profile '{}' from the {} backend",
            output.name, output.backend
        ))
    }
}
