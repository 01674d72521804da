//! Response status handling shared by every endpoint.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Send a request, turning non-success statuses into `ClientError::ApiError`.
pub(crate) async fn send_request(builder: RequestBuilder, endpoint: &str) -> Result<Response> {
    match send_request_allow_missing(builder, endpoint).await? {
        Some(response) => Ok(response),
        None => Err(ClientError::NotFound(endpoint.to_string())),
    }
}

/// Like `send_request`, but a 404 yields `Ok(None)`.
pub(crate) async fn send_request_allow_missing(
    builder: RequestBuilder,
    endpoint: &str,
) -> Result<Option<Response>> {
    let response = builder.send().await?;
    let status = response.status();
    debug!(endpoint, status = status.as_u16(), "Backend response");

    if status.is_success() {
        return Ok(Some(response));
    }
    if status.as_u16() == 404 {
        return Ok(None);
    }

    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message: message.trim().to_string(),
    })
}
