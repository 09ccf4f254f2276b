//! # API Errors
//!
//! One error type for the whole route layer. Client-caused failures map
//! to 4xx with a descriptive message; anything internal is logged and
//! answered with a generic body, so provider and database details never
//! reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shop_core::CheckoutError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("That email is already registered, log in instead")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Login required")]
    LoginRequired,

    #[error("Forbidden")]
    Forbidden,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("{0}")]
    Validation(String),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password hashing error")]
    PasswordHash,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::LoginRequired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EmptyCart | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Checkout(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Database(_) | AppError::Session(_) | AppError::PasswordHash => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to the client. Internal and provider errors
    /// are logged with full detail and reduced to a generic phrase here.
    fn client_message(&self) -> String {
        match self {
            AppError::Checkout(CheckoutError::Provider { .. }) => {
                "payment provider rejected the request".to_string()
            }
            AppError::Checkout(CheckoutError::Network(_)) => {
                "payment provider is unreachable".to_string()
            }
            AppError::Checkout(CheckoutError::WebhookVerificationFailed(_)) => {
                "webhook signature verification failed".to_string()
            }
            AppError::Database(_) | AppError::Session(_) | AppError::PasswordHash => {
                "internal error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("request failed: {self}");
        }

        let body = ErrorResponse {
            error: self.client_message(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::ItemNotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::EmptyCart.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Checkout(CheckoutError::Network("down".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_provider_detail_not_leaked() {
        let err = AppError::Checkout(CheckoutError::Provider {
            provider: "stripe".into(),
            message: "No such price: price_secret_internal".into(),
        });

        assert!(!err.client_message().contains("price_secret_internal"));
    }
}
