//! Errors raised while requesting a completion.

use thiserror::Error;

/// Failure talking to a model provider.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {message}")]
    Status {
        /// Provider identifier
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The provider is throttling requests (HTTP 429)
    #[error("{provider} is rate limiting requests: {message}")]
    RateLimited {
        /// Provider identifier
        provider: &'static str,
        /// Response body or reason
        message: String,
    },

    /// Missing, invalid or unauthorized API key
    #[error("{provider} rejected the credentials: {message}")]
    Unauthorized {
        /// Provider identifier
        provider: &'static str,
        /// Response body or reason
        message: String,
    },

    /// The request was rejected before being sent
    #[error("invalid completion request: {0}")]
    InvalidRequest(String),

    /// The response body did not have the expected shape
    #[error("could not decode {provider} response: {message}")]
    Decode {
        /// Provider identifier
        provider: &'static str,
        /// Decoder message
        message: String,
    },

    /// Connection, TLS or timeout failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Result alias for provider calls.
pub type Result<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = LlmError::Status {
            provider: "anthropic",
            status: 529,
            message: "Overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "anthropic returned HTTP 529: Overloaded");
    }

    #[test]
    fn test_credential_and_throttle_display() {
        let unauthorized = LlmError::Unauthorized {
            provider: "anthropic",
            message: "invalid x-api-key".to_string(),
        };
        assert_eq!(
            unauthorized.to_string(),
            "anthropic rejected the credentials: invalid x-api-key"
        );

        let throttled = LlmError::RateLimited {
            provider: "anthropic",
            message: "slow down".to_string(),
        };
        assert_eq!(
            throttled.to_string(),
            "anthropic is rate limiting requests: slow down"
        );
    }
}
