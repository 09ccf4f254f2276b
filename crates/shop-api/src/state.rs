//! # Application State
//!
//! Shared state for the Axum application: configuration, the SQLite
//! pool and the checkout gateway.

use shop_core::{BoxedCheckoutGateway, CheckoutUrls};
use shop_stripe::StripeCheckoutGateway;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for checkout callbacks
    pub base_url: String,
    /// SQLite database URL
    pub database_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// User id allowed to add catalog items
    pub admin_user_id: i64,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://store.db".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            admin_user_id: std::env::var("ADMIN_USER_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database pool
    pub pool: SqlitePool,
    /// Hosted-checkout gateway
    pub gateway: BoxedCheckoutGateway,
    /// Checkout callback URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state for production use: connect the database, run the
    /// schema bootstrap and wire up the Stripe gateway.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let pool = crate::db::connect(&config.database_url).await?;
        crate::db::init_schema(&pool).await?;

        let gateway = StripeCheckoutGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {e}"))?;

        Ok(Self::with_gateway(pool, Arc::new(gateway), config))
    }

    /// Create state with an explicit gateway (used by tests)
    pub fn with_gateway(
        pool: SqlitePool,
        gateway: BoxedCheckoutGateway,
        config: AppConfig,
    ) -> Self {
        let urls = CheckoutUrls::new(&config.base_url);
        Self {
            pool,
            gateway,
            urls,
            config,
        }
    }

    /// Success URL handed to the gateway, with the provider's
    /// session-id placeholder
    pub fn success_url(&self) -> String {
        self.urls.success_url_with_session()
    }

    /// Cancel URL handed to the gateway
    pub fn cancel_url(&self) -> String {
        self.urls.cancel_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            environment: "test".to_string(),
            admin_user_id: 1,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_not_production() {
        assert!(!test_config().is_production());
    }
}
