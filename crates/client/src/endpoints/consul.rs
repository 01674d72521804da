//! Consul KV endpoints.
//!
//! Responsibilities:
//! - Read a single key with its `ModifyIndex` (`GET /v1/kv/<key>`).
//! - List keys under a prefix (`GET /v1/kv/<prefix>?keys`).
//! - Write with optional check-and-set (`PUT /v1/kv/<key>?cas=<index>`).
//! - Delete a key (`DELETE /v1/kv/<key>`).
//!
//! Invariants:
//! - The token, when present, is sent as `X-Consul-Token`.
//! - Missing keys are `Ok(None)` / empty lists, never errors.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::url_encoding::encode_key_path;
use super::{send_request, send_request_allow_missing};
use crate::error::{ClientError, Result};

/// One key as returned by the KV read endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    /// Decoded value; `None` when the key holds no data.
    pub value: Option<Vec<u8>>,
    pub modify_index: u64,
}

impl KvPair {
    /// Value as UTF-8 text; a null value reads as empty.
    pub fn value_str(&self) -> Result<&str> {
        match &self.value {
            Some(bytes) => std::str::from_utf8(bytes)
                .map_err(|e| ClientError::decode(self.key.clone(), e)),
            None => Ok(""),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawKvPair {
    key: String,
    value: Option<String>,
    modify_index: u64,
}

fn kv_url(base_url: &str, key: &str) -> String {
    format!("{}/v1/kv/{}", base_url, encode_key_path(key))
}

fn with_token(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("X-Consul-Token", token.expose_secret()),
        None => builder,
    }
}

/// Read one key.
pub async fn get_key(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    key: &str,
) -> Result<Option<KvPair>> {
    let builder = with_token(client.get(kv_url(base_url, key)), token);
    let Some(response) = send_request_allow_missing(builder, key).await? else {
        return Ok(None);
    };

    let pairs: Vec<RawKvPair> = response.json().await?;
    let Some(raw) = pairs.into_iter().find(|pair| pair.key == key) else {
        return Ok(None);
    };
    let value = raw
        .value
        .map(|encoded| STANDARD.decode(encoded))
        .transpose()
        .map_err(|e| ClientError::decode(key, e))?;

    Ok(Some(KvPair {
        key: raw.key,
        value,
        modify_index: raw.modify_index,
    }))
}

/// List every key starting with `prefix`.
pub async fn list_keys(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    prefix: &str,
) -> Result<Vec<String>> {
    let builder = with_token(
        client.get(kv_url(base_url, prefix)).query(&[("keys", "")]),
        token,
    );
    match send_request_allow_missing(builder, prefix).await? {
        Some(response) => Ok(response.json().await?),
        None => Ok(Vec::new()),
    }
}

/// Write `value` to `key`.
///
/// With `cas = Some(0)` the write only succeeds if the key does not exist; with
/// `Some(index)` only if the key's `ModifyIndex` still equals `index`.
/// Returns whether Consul applied the write.
pub async fn put_key(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    key: &str,
    value: &str,
    cas: Option<u64>,
) -> Result<bool> {
    let mut builder = client.put(kv_url(base_url, key)).body(value.to_string());
    if let Some(index) = cas {
        builder = builder.query(&[("cas", index.to_string())]);
    }
    let response = send_request(with_token(builder, token), key).await?;
    let body = response.text().await?;
    match body.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ClientError::decode(
            format!("PUT response for {key}"),
            format!("expected true or false, got '{other}'"),
        )),
    }
}

/// Delete `key`. Deleting a missing key succeeds.
pub async fn delete_key(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    key: &str,
) -> Result<()> {
    let builder = with_token(client.delete(kv_url(base_url, key)), token);
    send_request_allow_missing(builder, key).await?;
    Ok(())
}
