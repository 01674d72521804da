//! AWS Signature Version 4 request signing.
//!
//! Responsibilities:
//! - Load AWS credentials from the standard environment variables.
//! - Compute the canonical request, string to sign, and `Authorization` header.
//!
//! Does NOT handle:
//! - Shared credential files, profiles, or instance metadata.
//! - Query-string (presigned URL) signing.
//!
//! Invariants:
//! - Header names are lowercased and sorted before signing.
//! - The secret key never appears in `Debug` output or errors.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::error::{ClientError, Result};
use profiler_config::env_var_or_none;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Static AWS credentials.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: Option<SecretString>,
}

impl AwsCredentials {
    /// Read `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and optional `AWS_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let access_key_id = env_var_or_none("AWS_ACCESS_KEY_ID")
            .ok_or(ClientError::MissingCredentials("AWS_ACCESS_KEY_ID"))?;
        let secret_access_key = env_var_or_none("AWS_SECRET_ACCESS_KEY")
            .ok_or(ClientError::MissingCredentials("AWS_SECRET_ACCESS_KEY"))?;
        Ok(Self {
            access_key_id,
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: env_var_or_none("AWS_SESSION_TOKEN")
                .map(|token| SecretString::new(token.into())),
        })
    }
}

/// Everything needed to sign one request.
pub struct SigningRequest<'a> {
    pub method: &'a str,
    /// Absolute path, already URI-encoded.
    pub path: &'a str,
    /// Canonical query string (empty for JSON APIs).
    pub query: &'a str,
    /// Headers to sign as `(name, value)`; must include `host` and `x-amz-date`.
    pub headers: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

/// Signing scope: when, where and for which service.
#[derive(Debug, Clone, Copy)]
pub struct SigningScope<'a> {
    pub time: DateTime<Utc>,
    pub region: &'a str,
    pub service: &'a str,
}

impl SigningScope<'_> {
    /// `x-amz-date` value for this scope.
    pub fn amz_date(&self) -> String {
        self.time.format("%Y%m%dT%H%M%SZ").to_string()
    }

    fn date(&self) -> String {
        self.time.format("%Y%m%d").to_string()
    }

    fn credential_scope(&self) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            self.date(),
            self.region,
            self.service
        )
    }
}

/// Compute the `Authorization` header value for `request`.
pub fn authorization_header(
    credentials: &AwsCredentials,
    scope: &SigningScope<'_>,
    request: &SigningRequest<'_>,
) -> Result<String> {
    let (canonical, signed_headers) = canonical_request(request);
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{}\n{}",
        scope.amz_date(),
        scope.credential_scope(),
        hex::encode(Sha256::digest(canonical.as_bytes()))
    );

    let key = signing_key(
        credentials.secret_access_key.expose_secret(),
        &scope.date(),
        scope.region,
        scope.service,
    )?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(format!(
        "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
        credentials.access_key_id,
        scope.credential_scope(),
        signed_headers,
        signature
    ))
}

/// Returns the canonical request and the signed header list.
fn canonical_request(request: &SigningRequest<'_>) -> (String, String) {
    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    headers.sort();

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        request.path,
        request.query,
        canonical_headers,
        signed_headers,
        hex::encode(Sha256::digest(request.payload))
    );
    (canonical, signed_headers)
}

fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ClientError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
