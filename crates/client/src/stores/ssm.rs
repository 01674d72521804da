//! AWS SSM backend: one `String` parameter per variable.
//!
//! Parameters are named `/profiler/<name>/<key>`, tagged `profiler=true` on
//! creation and written with the configured tier. SSM has no insertion order,
//! so keys other than `profile_name` come back sorted by name.

use reqwest::Client;
use tracing::debug;

use profiler_config::SsmConfig;
use profiler_config::constants::{PROFILE_NAME_KEY, REMOTE_PREFIX};

use super::UpsertOutcome;
use crate::endpoints::ssm::{
    self, Parameter, PutParameterRequest, SsmTarget, Tag, get_parameters_by_path,
};
use crate::error::{ClientError, Result};
use crate::sigv4::AwsCredentials;
use crate::variables::{SetOutcome, Variables};

const TAG_KEY: &str = "profiler";
const TAG_VALUE: &str = "true";

/// Profiles stored in SSM Parameter Store.
#[derive(Debug, Clone)]
pub struct SsmStore {
    http: Client,
    endpoint: String,
    region: String,
    tier: String,
    credentials: AwsCredentials,
}

impl SsmStore {
    pub fn new(http: Client, config: &SsmConfig, credentials: AwsCredentials) -> Self {
        Self {
            http,
            endpoint: config.endpoint_url(),
            region: config.region.clone(),
            tier: config.parameter_tier.clone(),
            credentials,
        }
    }

    fn target(&self) -> SsmTarget<'_> {
        SsmTarget {
            endpoint: &self.endpoint,
            region: &self.region,
            credentials: &self.credentials,
        }
    }

    fn root_path() -> String {
        format!("/{REMOTE_PREFIX}")
    }

    fn profile_path(name: &str) -> String {
        format!("/{REMOTE_PREFIX}/{name}")
    }

    async fn parameters(&self, name: &str) -> Result<Vec<Parameter>> {
        get_parameters_by_path(&self.http, &self.target(), &Self::profile_path(name)).await
    }

    async fn put(&self, name: &str, key: &str, value: &str, overwrite: bool) -> Result<()> {
        let parameter = format!("{}/{key}", Self::profile_path(name));
        let tags = if overwrite {
            Vec::new()
        } else {
            vec![Tag {
                key: TAG_KEY,
                value: TAG_VALUE,
            }]
        };
        let request = PutParameterRequest {
            name: &parameter,
            value,
            parameter_type: "String",
            overwrite,
            tier: &self.tier,
            tags,
        };
        ssm::put_parameter(&self.http, &self.target(), &request).await?;
        debug!(parameter, overwrite, "Wrote SSM parameter");
        Ok(())
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(!self.parameters(name).await?.is_empty())
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let parameters =
            get_parameters_by_path(&self.http, &self.target(), &Self::root_path()).await?;
        let mut names: Vec<String> = parameters
            .iter()
            .filter_map(|p| profile_of_parameter(&p.name))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    pub async fn fetch_variables(&self, name: &str) -> Result<Variables> {
        let prefix = format!("{}/", Self::profile_path(name));
        let parameters = self.parameters(name).await?;
        if parameters.is_empty() {
            return Err(ClientError::NotFound(name.to_string()));
        }
        let entries: Vec<(&str, &str)> = parameters
            .iter()
            .filter_map(|p| Some((p.name.strip_prefix(&prefix)?, p.value.as_str())))
            .collect();

        // SSM returns parameters ordered by name; `profile_name` still leads.
        let mut vars = Variables::new();
        if let Some((key, value)) = entries.iter().find(|(key, _)| *key == PROFILE_NAME_KEY) {
            vars.set(*key, *value);
        }
        for (key, value) in entries {
            vars.set(key, value);
        }
        Ok(vars)
    }

    pub async fn upsert(&self, name: &str, entry: Option<(&str, &str)>) -> Result<UpsertOutcome> {
        if let Some((key, _)) = entry
            && (key.is_empty() || key.contains('/'))
        {
            return Err(ClientError::InvalidVariable(format!(
                "SSM keys must be non-empty and contain no '/': '{key}'"
            )));
        }

        let mut vars = match self.fetch_variables(name).await {
            Ok(vars) => vars,
            Err(e) if e.is_not_found() => Variables::new(),
            Err(e) => return Err(e),
        };
        let created = vars.is_empty();
        if created {
            self.put(name, PROFILE_NAME_KEY, name, false).await?;
            vars.set(PROFILE_NAME_KEY, name);
        }

        let change = match entry {
            Some((key, value)) => {
                let outcome = vars.set(key, value);
                match outcome {
                    SetOutcome::Inserted => self.put(name, key, value, false).await?,
                    SetOutcome::Replaced => self.put(name, key, value, true).await?,
                    SetOutcome::Unchanged => {}
                }
                Some(outcome)
            }
            None => None,
        };
        Ok(UpsertOutcome { created, change })
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
        let parameters = self.parameters(name).await?;
        if parameters.is_empty() {
            return Err(ClientError::NotFound(name.to_string()));
        }
        for parameter in &parameters {
            ssm::delete_parameter(&self.http, &self.target(), &parameter.name).await?;
        }
        debug!(name, count = parameters.len(), "Deleted SSM profile");
        Ok(())
    }
}

/// `/profiler/<name>/<key>` → `<name>`.
fn profile_of_parameter(parameter: &str) -> Option<&str> {
    let mut segments = parameter.strip_prefix('/')?.split('/');
    match (segments.next(), segments.next()) {
        (Some(root), Some(name)) if root == REMOTE_PREFIX && !name.is_empty() => Some(name),
        _ => None,
    }
}
