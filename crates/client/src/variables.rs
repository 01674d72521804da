//! Insertion-ordered variable map shared by every backend.
//!
//! Invariants:
//! - Keys are unique; setting an existing key replaces its value in place.
//! - Iteration follows first-insertion order.
//! - A variable is exportable only if its name is a portable shell identifier
//!   and its value has no NUL byte.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Result of setting one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was new and appended at the end.
    Inserted,
    /// The key existed with the same value; nothing changed.
    Unchanged,
    /// The key existed with a different value, now replaced.
    Replaced,
}

impl SetOutcome {
    /// Whether the stored document needs rewriting.
    pub fn is_change(self) -> bool {
        !matches!(self, SetOutcome::Unchanged)
    }
}

/// Ordered mapping of variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace `key`, reporting what happened.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> SetOutcome {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) if *existing == value => SetOutcome::Unchanged,
            Some((_, existing)) => {
                *existing = value;
                SetOutcome::Replaced
            }
            None => {
                self.entries.push((key, value));
                SetOutcome::Inserted
            }
        }
    }

    /// Apply every entry of `other` on top of `self`; later values win.
    pub fn overlay(&mut self, other: &Variables) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Why a variable cannot be exported into a process environment.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportIssue {
    #[error("name is empty")]
    EmptyName,

    #[error("name must start with a letter or '_' and contain only letters, digits and '_'")]
    InvalidName,

    #[error("value contains a NUL byte")]
    NulInValue,
}

/// Check that `key=value` can be exported and written as `export KEY="VALUE"`.
pub fn check_exportable(key: &str, value: &str) -> Result<(), ExportIssue> {
    let mut chars = key.chars();
    match chars.next() {
        None => return Err(ExportIssue::EmptyName),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            return Err(ExportIssue::InvalidName);
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ExportIssue::InvalidName);
    }
    if value.contains('\0') {
        return Err(ExportIssue::NulInValue);
    }
    Ok(())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (key, value) in iter {
            vars.set(key, value);
        }
        vars
    }
}

impl IntoIterator for Variables {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
