//! # Request Handlers
//!
//! Axum handlers for the shop routes, grouped by area.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::response::IntoResponse;
use axum::Json;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "minishop",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
