//! Local file backend: one YAML document per profile.
//!
//! Responsibilities:
//! - Map a profile name to `<folder>/.<name>.yml` (falling back to `.yaml` on read).
//! - Upsert variables by rewriting the whole document atomically.
//!
//! Invariants:
//! - A created document always starts with `profile_name: <name>`.
//! - A missing profiles folder is an empty backend, not an error.

use std::path::{Path, PathBuf};

use profiler_config::constants::PROFILE_NAME_KEY;
use profiler_config::persistence::atomic_write;
use tracing::debug;

use super::UpsertOutcome;
use crate::error::{ClientError, Result};
use crate::variables::Variables;
use crate::yaml::{parse_yaml_variables, render_yaml_variables};

const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Profiles stored as dot-files in a folder.
#[derive(Debug, Clone)]
pub struct LocalStore {
    folder: PathBuf,
}

impl LocalStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Path new documents are written to.
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.folder.join(format!(".{name}.{}", EXTENSIONS[0]))
    }

    /// Path of the existing document for `name`, if any.
    fn existing_path(&self, name: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.folder.join(format!(".{name}.{ext}")))
            .find(|path| path.is_file())
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.existing_path(name).is_some())
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ClientError::io(&self.folder, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ClientError::io(&self.folder, e))?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = profile_name_from_file(file_name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    pub fn fetch_variables(&self, name: &str) -> Result<Variables> {
        let path = self
            .existing_path(name)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))?;
        read_document(&path)
    }

    pub fn upsert(&self, name: &str, entry: Option<(&str, &str)>) -> Result<UpsertOutcome> {
        let (path, mut vars, created) = match self.existing_path(name) {
            Some(path) => {
                let vars = read_document(&path)?;
                (path, vars, false)
            }
            None => {
                let mut vars = Variables::new();
                vars.set(PROFILE_NAME_KEY, name);
                (self.profile_path(name), vars, true)
            }
        };

        let change = entry.map(|(key, value)| vars.set(key, value));
        let outcome = UpsertOutcome { created, change };
        if outcome.is_write_needed() {
            let rendered = render_yaml_variables(&vars)?;
            atomic_write(&path, rendered.as_bytes()).map_err(|e| ClientError::io(&path, e))?;
            debug!(path = %path.display(), created, "Wrote local profile");
        }
        Ok(outcome)
    }

    pub fn show_keys(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .fetch_variables(name)?
            .keys()
            .map(str::to_string)
            .collect())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self
            .existing_path(name)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))?;
        std::fs::remove_file(&path).map_err(|e| ClientError::io(&path, e))?;
        debug!(path = %path.display(), "Deleted local profile");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Variables> {
    let raw = std::fs::read_to_string(path).map_err(|e| ClientError::io(path, e))?;
    parse_yaml_variables(&raw, &path.display().to_string())
}

/// `.demo.yml` → `demo`; anything else → `None`.
fn profile_name_from_file(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_prefix('.')?;
    EXTENSIONS.iter().find_map(|ext| {
        stem.strip_suffix(ext)
            .and_then(|s| s.strip_suffix('.'))
            .filter(|name| !name.is_empty())
    })
}
