//! HTTP plumbing shared by providers.

use crate::error::{LlmError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Request timeout applied when the caller does not configure one.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Build an HTTP client with a whole-request timeout.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(
            timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ))
        .build()
        .map_err(|e| LlmError::Client(e.to_string()))
}

/// Map a non-success HTTP status to the matching error variant.
#[must_use]
pub fn status_error(provider: &'static str, status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized {
            provider,
            message: body,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            provider,
            message: body,
        },
        _ => LlmError::Status {
            provider,
            status: status.as_u16(),
            message: body,
        },
    }
}
