//! Backend kind tag shared by the registry and the adapter dispatcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage backend holding a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// YAML document in the local profiles folder.
    #[default]
    Local,
    /// AWS SSM Parameter Store, one parameter per variable.
    Ssm,
    /// Consul KV, one blob per profile.
    Consul,
}

impl BackendKind {
    /// All backends, in the order they are listed to the user.
    pub const ALL: [BackendKind; 3] = [BackendKind::Local, BackendKind::Ssm, BackendKind::Consul];

    /// The persisted tag for this backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Ssm => "ssm",
            BackendKind::Consul => "consul",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known backend tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backend '{0}' (expected one of: local, ssm, consul)")]
pub struct ParseBackendKindError(pub String);

impl FromStr for BackendKind {
    type Err = ParseBackendKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "ssm" => Ok(BackendKind::Ssm),
            "consul" => Ok(BackendKind::Consul),
            _ => Err(ParseBackendKindError(s.to_string())),
        }
    }
}
