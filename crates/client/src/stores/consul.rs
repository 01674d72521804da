//! Consul KV backend: one `key: value` blob per profile under `profiler/`.
//!
//! Responsibilities:
//! - Read, list, upsert and delete `profiler/<name>` keys.
//! - Create the `profiler/` folder marker on first write.
//!
//! Invariants:
//! - Every write is a check-and-set against the `ModifyIndex` that was read.
//! - A lost check-and-set surfaces as `ClientError::Conflict`.
//! - The folder marker is never reported as a profile.

use reqwest::Client;
use secrecy::SecretString;
use tracing::debug;

use profiler_config::constants::{PROFILE_NAME_KEY, REMOTE_PREFIX};

use super::UpsertOutcome;
use crate::document::{parse_document, render_document, validate_line_variable};
use crate::endpoints::consul;
use crate::error::{ClientError, Result};
use crate::variables::Variables;

/// Profiles stored in Consul KV.
#[derive(Debug, Clone)]
pub struct ConsulStore {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl ConsulStore {
    pub fn new(http: Client, address: &str, token: Option<SecretString>) -> Self {
        Self {
            http,
            base_url: address.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn folder_key() -> String {
        format!("{REMOTE_PREFIX}/")
    }

    fn profile_key(name: &str) -> String {
        format!("{REMOTE_PREFIX}/{name}")
    }

    async fn read(&self, name: &str) -> Result<Option<(Variables, u64)>> {
        let key = Self::profile_key(name);
        let Some(pair) =
            consul::get_key(&self.http, &self.base_url, self.token.as_ref(), &key).await?
        else {
            return Ok(None);
        };
        let vars = parse_document(pair.value_str()?, &key)?;
        Ok(Some((vars, pair.modify_index)))
    }

    async fn ensure_folder(&self) -> Result<()> {
        let key = Self::folder_key();
        let existing = consul::get_key(&self.http, &self.base_url, self.token.as_ref(), &key).await?;
        if existing.is_none() {
            // cas=0 makes a concurrent creation a harmless no-op.
            consul::put_key(&self.http, &self.base_url, self.token.as_ref(), &key, "", Some(0))
                .await?;
            debug!(key, "Created Consul folder marker");
        }
        Ok(())
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let key = Self::profile_key(name);
        Ok(
            consul::get_key(&self.http, &self.base_url, self.token.as_ref(), &key)
                .await?
                .is_some(),
        )
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let folder = Self::folder_key();
        let keys =
            consul::list_keys(&self.http, &self.base_url, self.token.as_ref(), &folder).await?;
        let mut names: Vec<String> = keys
            .iter()
            .filter_map(|key| key.strip_prefix(folder.as_str()))
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    pub async fn fetch_variables(&self, name: &str) -> Result<Variables> {
        self.read(name)
            .await?
            .map(|(vars, _)| vars)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))
    }

    pub async fn upsert(&self, name: &str, entry: Option<(&str, &str)>) -> Result<UpsertOutcome> {
        if let Some((key, value)) = entry {
            validate_line_variable(key, value)?;
        }
        self.ensure_folder().await?;

        let (mut vars, cas, created) = match self.read(name).await? {
            Some((vars, index)) => (vars, index, false),
            None => {
                let mut vars = Variables::new();
                vars.set(PROFILE_NAME_KEY, name);
                (vars, 0, true)
            }
        };

        let change = entry.map(|(key, value)| vars.set(key, value));
        let outcome = UpsertOutcome { created, change };
        if !outcome.is_write_needed() {
            return Ok(outcome);
        }

        let key = Self::profile_key(name);
        let applied = consul::put_key(
            &self.http,
            &self.base_url,
            self.token.as_ref(),
            &key,
            &render_document(&vars),
            Some(cas),
        )
        .await?;
        if !applied {
            return Err(ClientError::Conflict(name.to_string()));
        }
        debug!(key, created, "Wrote Consul profile");
        Ok(outcome)
    }

    pub async fn show_keys(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .fetch_variables(name)
            .await?
            .keys()
            .map(str::to_string)
            .collect())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name).await? {
            return Err(ClientError::NotFound(name.to_string()));
        }
        let key = Self::profile_key(name);
        consul::delete_key(&self.http, &self.base_url, self.token.as_ref(), &key).await?;
        debug!(key, "Deleted Consul profile");
        Ok(())
    }
}
