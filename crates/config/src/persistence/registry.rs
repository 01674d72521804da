//! Profile registry: the persisted name → backend index.
//!
//! Responsibilities:
//! - Read the registry JSON array (`[{"name": ..., "profile_type": ...}]`).
//! - Add and remove entries with read-modify-write under an exclusive lock.
//!
//! Does NOT handle:
//! - Profile contents (each backend owns those).
//! - Deciding which backend a new profile goes to (the command layer does).
//!
//! Invariants:
//! - At most one entry per name; the first writer wins.
//! - A missing registry file is an empty registry.
//! - Writes hold `<registry>.lock` and replace the file atomically.

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::atomic_write;
use crate::types::BackendKind;

/// One registered profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    #[serde(rename = "profile_type")]
    pub backend: BackendKind,
}

impl RegistryEntry {
    pub fn new(name: impl Into<String>, backend: BackendKind) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

/// Errors raised while reading or writing the registry file.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read registry at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry at {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write registry at {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock registry at {path}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize registry")]
    Serialize(#[source] serde_json::Error),
}

/// File-backed registry of profile names and their backends.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in stored order.
    pub fn list(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
        read_entries(&self.path)
    }

    /// Look up one entry by name.
    pub fn get(&self, name: &str) -> Result<Option<RegistryEntry>, RegistryError> {
        Ok(self.list()?.into_iter().find(|entry| entry.name == name))
    }

    /// Register `name` under `backend`.
    ///
    /// Returns `false` without touching the file when the name is already registered,
    /// whatever backend it was registered under.
    pub fn add(&self, name: &str, backend: BackendKind) -> Result<bool, RegistryError> {
        let _lock = self.lock()?;
        let mut entries = read_entries(&self.path)?;
        if entries.iter().any(|entry| entry.name == name) {
            tracing::debug!(name, "Profile already registered");
            return Ok(false);
        }
        entries.push(RegistryEntry::new(name, backend));
        self.write(&entries)?;
        tracing::info!(name, backend = %backend, "Registered profile");
        Ok(true)
    }

    /// Remove `name`. Returns `false` when it was not registered.
    pub fn del(&self, name: &str) -> Result<bool, RegistryError> {
        let _lock = self.lock()?;
        let mut entries = read_entries(&self.path)?;
        let before = entries.len();
        entries.retain(|entry| entry.name != name);
        if entries.len() == before {
            return Ok(false);
        }
        self.write(&entries)?;
        tracing::info!(name, "Unregistered profile");
        Ok(true)
    }

    fn lock(&self) -> Result<RegistryLock, RegistryError> {
        let mut lock_name = self.path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = self.path.with_file_name(lock_name);

        let lock_err = |source| RegistryError::Lock {
            path: lock_path.clone(),
            source,
        };
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let file = File::create(&lock_path).map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(RegistryLock { file })
    }

    fn write(&self, entries: &[RegistryEntry]) -> Result<(), RegistryError> {
        let json = serde_json::to_vec_pretty(entries).map_err(RegistryError::Serialize)?;
        atomic_write(&self.path, &json).map_err(|source| RegistryError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Holds the advisory lock until dropped.
struct RegistryLock {
    file: File,
}

impl Drop for RegistryLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn read_entries(path: &Path) -> Result<Vec<RegistryEntry>, RegistryError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(RegistryError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
