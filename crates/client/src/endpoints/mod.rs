//! Remote API endpoint implementations.
//!
//! Each function takes the shared `reqwest::Client` and the backend's base URL
//! and performs exactly one logical API call. No retries are attempted.

pub mod consul;
mod request;
pub mod ssm;
pub mod url_encoding;

pub(crate) use request::{send_request, send_request_allow_missing};
pub use url_encoding::encode_key_path;
