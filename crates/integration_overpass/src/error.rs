//! Overpass error types

use thiserror::Error;

/// Errors that can occur while querying the Overpass API
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Connection to the Overpass server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Overpass answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not a valid Overpass JSON document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Too many requests from this client
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Server overloaded or gateway timed out
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OverpassError {
    /// Returns true if a later attempt could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(OverpassError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(OverpassError::ServiceUnavailable("HTTP 504".to_string()).is_retryable());
        assert!(OverpassError::Timeout { timeout_secs: 20 }.is_retryable());
        assert!(
            OverpassError::RateLimitExceeded {
                retry_after_secs: None
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!OverpassError::ParseError("test".to_string()).is_retryable());
        assert!(!OverpassError::ConfigurationError("test".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = OverpassError::Timeout { timeout_secs: 20 };
        assert!(err.to_string().contains("20"));

        let err = OverpassError::RateLimitExceeded {
            retry_after_secs: Some(30),
        };
        assert!(err.to_string().contains("30"));
    }
}
