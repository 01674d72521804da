//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use serde_json::{Value, json};

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Body of a Consul `GET /v1/kv/<key>` response.
#[allow(dead_code)]
pub fn kv_body(key: &str, value: &str, modify_index: u64) -> Value {
    json!([{
        "Key": key,
        "Value": STANDARD.encode(value),
        "Flags": 0,
        "CreateIndex": 1,
        "ModifyIndex": modify_index,
        "LockIndex": 0,
    }])
}

/// Body of an SSM `GetParametersByPath` response.
#[allow(dead_code)]
pub fn parameters_body(parameters: &[(&str, &str)], next_token: Option<&str>) -> Value {
    let parameters: Vec<Value> = parameters
        .iter()
        .map(|(name, value)| json!({"Name": name, "Value": value, "Type": "String", "Version": 1}))
        .collect();
    let mut body = json!({ "Parameters": parameters });
    if let Some(token) = next_token {
        body["NextToken"] = json!(token);
    }
    body
}

/// Credentials from the AWS documentation examples.
#[allow(dead_code)]
pub fn example_credentials() -> profiler_client::AwsCredentials {
    profiler_client::AwsCredentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: SecretString::new(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string().into(),
        ),
        session_token: None,
    }
}
