//! AWS SSM Parameter Store endpoints (JSON 1.1 protocol).
//!
//! Responsibilities:
//! - Sign and send `AmazonSSM.<Action>` POST requests.
//! - `GetParametersByPath` with `NextToken` pagination.
//! - `PutParameter` and `DeleteParameter`.
//!
//! Invariants:
//! - Every request is signed with SigV4 for the `ssm` service.
//! - `ParameterNotFound` errors map to `ClientError::NotFound`.

use chrono::Utc;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};
use crate::sigv4::{AwsCredentials, SigningRequest, SigningScope, authorization_header};

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const SERVICE: &str = "ssm";

/// Where and as whom SSM requests are sent.
pub struct SsmTarget<'a> {
    pub endpoint: &'a str,
    pub region: &'a str,
    pub credentials: &'a AwsCredentials,
}

/// One parameter returned by `GetParametersByPath`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetParametersByPathResponse {
    #[serde(default)]
    parameters: Vec<Parameter>,
    next_token: Option<String>,
}

#[derive(Deserialize)]
struct AwsErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// Options for `PutParameter`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutParameterRequest<'a> {
    pub name: &'a str,
    pub value: &'a str,
    #[serde(rename = "Type")]
    pub parameter_type: &'a str,
    pub overwrite: bool,
    pub tier: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Host header value as reqwest will send it: port only when non-default.
fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{url} has no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

async fn call(
    client: &Client,
    target: &SsmTarget<'_>,
    action: &str,
    body: &serde_json::Value,
) -> Result<reqwest::Response> {
    let url = Url::parse(target.endpoint)
        .map_err(|e| ClientError::InvalidUrl(format!("Invalid SSM endpoint: {e}")))?;
    let host = host_header(&url)?;
    let payload = serde_json::to_vec(body).map_err(|e| ClientError::decode(action, e))?;
    let amz_target = format!("AmazonSSM.{action}");

    let scope = SigningScope {
        time: Utc::now(),
        region: target.region,
        service: SERVICE,
    };
    let amz_date = scope.amz_date();
    let token = target
        .credentials
        .session_token
        .as_ref()
        .map(|t| t.expose_secret().to_string());

    let mut signed: Vec<(&str, &str)> = vec![
        ("content-type", CONTENT_TYPE),
        ("host", host.as_str()),
        ("x-amz-date", amz_date.as_str()),
        ("x-amz-target", amz_target.as_str()),
    ];
    if let Some(token) = &token {
        signed.push(("x-amz-security-token", token.as_str()));
    }

    let path = match url.path() {
        "" => "/",
        path => path,
    };
    let authorization = authorization_header(
        target.credentials,
        &scope,
        &SigningRequest {
            method: "POST",
            path,
            query: "",
            headers: &signed,
            payload: &payload,
        },
    )?;

    let mut builder = client
        .post(url.clone())
        .header("Content-Type", CONTENT_TYPE)
        .header("X-Amz-Date", &amz_date)
        .header("X-Amz-Target", &amz_target)
        .header("Authorization", authorization)
        .body(payload);
    if let Some(token) = &token {
        builder = builder.header("X-Amz-Security-Token", token);
    }

    debug!(action, endpoint = %url, "SSM request");
    let response = builder.send().await?;
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<AwsErrorBody>(&text) {
        Ok(err) if err.error_type.ends_with("ParameterNotFound") => {
            Err(ClientError::NotFound(err.message))
        }
        Ok(err) if !err.error_type.is_empty() => Err(ClientError::ApiError {
            status,
            url,
            message: format!("{}: {}", err.error_type, err.message),
        }),
        _ => Err(ClientError::ApiError {
            status,
            url,
            message: text.trim().to_string(),
        }),
    }
}

/// Fetch every parameter below `path`, following pagination.
pub async fn get_parameters_by_path(
    client: &Client,
    target: &SsmTarget<'_>,
    path: &str,
) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let mut body = json!({
            "Path": path,
            "Recursive": true,
            "WithDecryption": true,
        });
        if let Some(token) = &next_token {
            body["NextToken"] = json!(token);
        }

        let response = call(client, target, "GetParametersByPath", &body).await?;
        let page: GetParametersByPathResponse = response.json().await?;
        parameters.extend(page.parameters);

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok(parameters)
}

/// Create or overwrite one parameter.
pub async fn put_parameter(
    client: &Client,
    target: &SsmTarget<'_>,
    request: &PutParameterRequest<'_>,
) -> Result<()> {
    let body = serde_json::to_value(request)
        .map_err(|e| ClientError::decode("PutParameter request", e))?;
    call(client, target, "PutParameter", &body).await?;
    Ok(())
}

/// Delete one parameter.
pub async fn delete_parameter(client: &Client, target: &SsmTarget<'_>, name: &str) -> Result<()> {
    call(client, target, "DeleteParameter", &json!({ "Name": name })).await?;
    Ok(())
}
