use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Failures surfaced by page extraction. Neither variant is retried here.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Navigation did not reach DOM-ready within the bound
    #[error("scrape timeout: {url} did not reach DOM-ready within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Any other navigation or runtime failure reported by the rendering engine
    #[error("scrape error: {0}")]
    Scrape(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for FetchError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Scrape(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::Scrape("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert_eq!(err.to_string(), "scrape error: net::ERR_NAME_NOT_RESOLVED");
    }

    #[test]
    fn test_timeout_error() {
        let err = FetchError::Timeout {
            url: "https://example.com".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert!(err.is_timeout());
        assert!(!FetchError::Scrape("boom".to_string()).is_timeout());
        assert!(err.to_string().contains("example.com"));
        assert!(err.to_string().contains("60s"));
    }

    #[test]
    fn test_sub_second_timeout_display() {
        let err = FetchError::Timeout {
            url: "https://example.com".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert_eq!(
            err.to_string(),
            "scrape timeout: https://example.com did not reach DOM-ready within 250ms"
        );
    }
}
