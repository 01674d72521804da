//! Profile service: registry dispatch plus source resolution.
//!
//! Responsibilities:
//! - Resolve a profile name to its backend through the registry.
//! - Build the ordered source list for an activation.
//! - Implement `add`, `show`, `list` and `delete` on top of the stores.
//!
//! Does NOT handle:
//! - Touching the process environment (see `activation`).
//! - Output formatting (see the CLI).
//!
//! Invariants:
//! - Every backend write completes before the registry is updated.
//! - A name is never registered under two backends.

use std::path::Path;

use profiler_client::{ProfileStore, UpsertOutcome, Variables};
use profiler_config::{BackendKind, Config, Registry};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::merge::merge_sources;
use crate::sources::{Source, discover_ambient_sources, read_activation_record};

/// Result of `ProfileService::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddReport {
    pub backend: BackendKind,
    pub outcome: UpsertOutcome,
    /// The name was newly registered.
    pub registered: bool,
}

/// Profile names of one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendListing {
    pub backend: BackendKind,
    pub names: Vec<String>,
}

/// Variable names of one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileKeys {
    pub name: String,
    pub backend: BackendKind,
    pub keys: Vec<String>,
}

/// Operations over registered profiles.
#[derive(Debug, Clone)]
pub struct ProfileService {
    config: Config,
    registry: Registry,
}

impl ProfileService {
    pub fn new(config: Config) -> Self {
        let registry = Registry::new(&config.repository_path);
        Self { config, registry }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Backend `name` is registered under.
    pub fn backend_of(&self, name: &str) -> Result<BackendKind> {
        self.registry
            .get(name)?
            .map(|entry| entry.backend)
            .ok_or_else(|| EngineError::NotRegistered(name.to_string()))
    }

    fn store(&self, backend: BackendKind) -> Result<ProfileStore> {
        Ok(ProfileStore::open(backend, &self.config)?)
    }

    /// Ordered sources for activating `name` in `dir`.
    ///
    /// Without a name, the existing activation record in `dir` seeds the list.
    pub async fn resolve(&self, name: Option<&str>, dir: &Path) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        match name {
            Some(name) => {
                let backend = self.backend_of(name)?;
                let variables = self.store(backend)?.fetch_variables(name).await?;
                debug!(name, %backend, count = variables.len(), "Fetched profile");
                sources.push(Source::profile(name, variables));
            }
            None => {
                if let Some(record) = read_activation_record(dir)? {
                    sources.push(record);
                }
            }
        }
        sources.extend(discover_ambient_sources(dir)?);
        Ok(sources)
    }

    /// Merged environment for activating `name` in `dir`.
    pub async fn prepare_activation(&self, name: Option<&str>, dir: &Path) -> Result<Variables> {
        let sources = self.resolve(name, dir).await?;
        Ok(merge_sources(&sources))
    }

    /// Create `name` if needed and set `entry` on it.
    ///
    /// The registered backend wins unless `requested` names a different one,
    /// which is `AlreadyExists`. Unregistered names go to `requested` or local.
    pub async fn add(
        &self,
        name: &str,
        entry: Option<(&str, &str)>,
        requested: Option<BackendKind>,
    ) -> Result<AddReport> {
        let registered = self.registry.get(name)?.map(|e| e.backend);
        let backend = match (registered, requested) {
            (Some(registered), Some(requested)) if registered != requested => {
                return Err(EngineError::AlreadyExists {
                    name: name.to_string(),
                    registered,
                    requested,
                });
            }
            (Some(registered), _) => registered,
            (None, requested) => requested.unwrap_or_default(),
        };

        let outcome = self.store(backend)?.upsert(name, entry).await?;
        let newly_registered = self.registry.add(name, backend)?;
        Ok(AddReport {
            backend,
            outcome,
            registered: newly_registered,
        })
    }

    /// Variable names of `name`.
    pub async fn show(&self, name: &str) -> Result<ProfileKeys> {
        let backend = self.backend_of(name)?;
        let keys = self.store(backend)?.show_keys(name).await?;
        Ok(ProfileKeys {
            name: name.to_string(),
            backend,
            keys,
        })
    }

    /// Profile names per enabled backend: local always, Consul when configured,
    /// SSM when enabled.
    pub async fn list(&self) -> Result<Vec<BackendListing>> {
        let mut backends = vec![BackendKind::Local];
        if self.config.consul.is_some() {
            backends.push(BackendKind::Consul);
        }
        if self.config.ssm.enabled {
            backends.push(BackendKind::Ssm);
        }

        let mut listings = Vec::with_capacity(backends.len());
        for backend in backends {
            let names = self.store(backend)?.list().await?;
            listings.push(BackendListing { backend, names });
        }
        Ok(listings)
    }

    /// Delete `name` from its backend, then from the registry.
    ///
    /// A profile already missing from its backend only logs a warning so the
    /// stale registry entry can still be removed.
    pub async fn delete(&self, name: &str) -> Result<BackendKind> {
        let backend = self.backend_of(name)?;
        match self.store(backend)?.delete(name).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!(name, %backend, "Profile missing from backend; removing registry entry");
            }
            Err(e) => return Err(e.into()),
        }
        self.registry.del(name)?;
        info!(name, %backend, "Deleted profile");
        Ok(backend)
    }
}
