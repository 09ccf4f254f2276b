//! # Checkout Error Types
//!
//! Typed errors for checkout gateway operations.
//! All gateway calls return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Error type for hosted-checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (e.g. empty cart)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns true if retrying the call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Network(_) | CheckoutError::Provider { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::Network(_) => 503,
            CheckoutError::WebhookVerificationFailed(_) => 401,
            CheckoutError::WebhookParseError(_) => 400,
            CheckoutError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CheckoutError::Network("timeout".into()).is_retryable());
        assert!(CheckoutError::Provider {
            provider: "stripe".into(),
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(!CheckoutError::InvalidRequest("empty cart".into()).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CheckoutError::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(
            CheckoutError::WebhookVerificationFailed("bad sig".into()).status_code(),
            401
        );
        assert_eq!(
            CheckoutError::Provider {
                provider: "stripe".into(),
                message: "x".into()
            }
            .status_code(),
            502
        );
    }
}
