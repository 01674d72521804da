//! Profile store adapters.
//!
//! This crate provides the three profile backends (local YAML files, AWS SSM
//! Parameter Store, Consul KV) behind one `ProfileStore` dispatcher, plus the
//! HTTP endpoint functions and SigV4 signing the remote backends are built on.

pub mod document;
pub mod endpoints;
pub mod error;
pub mod sigv4;
pub mod stores;
pub mod variables;
pub mod yaml;

pub use error::{ClientError, Result};
pub use sigv4::AwsCredentials;
pub use stores::{
    ConsulStore, LocalStore, ProfileStore, SsmStore, UpsertOutcome, build_http_client,
    validate_profile_name, validate_variable,
};
pub use variables::{ExportIssue, SetOutcome, Variables, check_exportable};
pub use yaml::parse_yaml_variables;
