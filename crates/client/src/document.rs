//! `key: value` line documents stored as a single Consul blob.
//!
//! Invariants:
//! - Each non-blank line splits on its first `:`; one space after the colon is dropped.
//! - A non-blank line without `:` is a decode error.
//! - Rendering writes one `key: value` line per variable, in order.

use crate::error::{ClientError, Result};
use crate::variables::Variables;

/// Parse a stored document. `context` names the document in errors.
pub fn parse_document(raw: &str, context: &str) -> Result<Variables> {
    let mut vars = Variables::new();
    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(ClientError::decode(
                context,
                format!("line {} has no ':' delimiter", index + 1),
            ));
        };
        let value = value.strip_prefix(' ').unwrap_or(value);
        vars.set(key.trim(), value.trim_end_matches('\r'));
    }
    Ok(vars)
}

/// Render variables back into a document.
pub fn render_document(vars: &Variables) -> String {
    let mut out = String::new();
    for (key, value) in vars.iter() {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Check that a variable survives a render/parse cycle unchanged.
pub fn validate_line_variable(key: &str, value: &str) -> Result<()> {
    if key.trim() != key || key.is_empty() || key.contains(':') || key.contains('\n') {
        return Err(ClientError::InvalidVariable(format!(
            "key '{key}' must be non-empty without ':', newlines or surrounding spaces"
        )));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(ClientError::InvalidVariable(format!(
            "value for '{key}' must not contain newlines"
        )));
    }
    Ok(())
}
