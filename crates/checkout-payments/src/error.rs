//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Upstream could not be reached or the connection broke mid-request
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream did not answer within the configured timeout
    #[error("Upstream timed out after {0}s")]
    Timeout(u64),

    /// Upstream answered with something that is not JSON
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// Webhook payload parsing failed
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PaymentError {
    /// Map a reqwest failure, keeping timeouts distinct from other transport errors
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            PaymentError::Timeout(timeout_secs)
        } else {
            PaymentError::Network(err)
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Network(_) | PaymentError::Timeout(_))
    }

    /// Message returned to API callers; the detail only goes to the log
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Network(_) | PaymentError::Timeout(_) => {
                "The payment provider is unreachable. Please try again."
            }
            PaymentError::InvalidResponse(_) => "The payment provider returned an unexpected response.",
            PaymentError::Config(_) => "Service configuration error.",
            _ => "An error occurred processing your request.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_retryable() {
        assert!(PaymentError::Timeout(10).is_retryable());
        assert!(!PaymentError::InvalidResponse("<html>".into()).is_retryable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = PaymentError::InvalidResponse("expected value at line 1".into());
        assert_eq!(err.to_string(), "Invalid upstream response: expected value at line 1");
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = PaymentError::InvalidResponse("<html>502 Bad Gateway</html>".into());
        assert_eq!(err.user_message(), "The payment provider returned an unexpected response.");

        assert_eq!(
            PaymentError::Timeout(10).user_message(),
            "The payment provider is unreachable. Please try again."
        );
        assert_eq!(
            PaymentError::Storage("lock poisoned".into()).user_message(),
            "An error occurred processing your request."
        );
    }
}
