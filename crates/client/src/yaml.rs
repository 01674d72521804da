//! YAML mapping documents as variables.
//!
//! Scalars are stringified (`true`, `8080`); `null` reads as an empty string.
//! Nested sequences or mappings cannot be exported and are decode errors.

use serde_yaml::Value;

use crate::error::{ClientError, Result};
use crate::variables::Variables;

/// Parse a YAML mapping document into variables, in document order.
///
/// An empty document yields no variables.
pub fn parse_yaml_variables(raw: &str, context: &str) -> Result<Variables> {
    if raw.trim().is_empty() {
        return Ok(Variables::new());
    }
    let value: Value = serde_yaml::from_str(raw).map_err(|e| ClientError::decode(context, e))?;
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Variables::new()),
        _ => return Err(ClientError::decode(context, "document is not a mapping")),
    };

    let mut vars = Variables::new();
    for (key, value) in &mapping {
        let key = scalar_to_string(key)
            .ok_or_else(|| ClientError::decode(context, "mapping key is not a scalar"))?;
        let value = scalar_to_string(value).ok_or_else(|| {
            ClientError::decode(context, format!("value for '{key}' is not a scalar"))
        })?;
        vars.set(key, value);
    }
    Ok(vars)
}

/// Render variables as a YAML mapping of strings.
pub fn render_yaml_variables(vars: &Variables) -> Result<String> {
    serde_yaml::to_string(vars).map_err(|e| ClientError::decode("profile document", e))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
