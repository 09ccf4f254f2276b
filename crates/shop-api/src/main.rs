//! # minishop
//!
//! Small storefront with hosted Stripe checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export DATABASE_URL=sqlite://store.db
//!
//! # Run the server
//! minishop
//! ```

use shop_api::{routes, state::AppConfig, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env();
    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    let state = AppState::new(config).await?;

    info!("Environment: {}", state.config.environment);
    info!("Database: {}", state.config.database_url);
    info!("Checkout provider: {}", state.gateway.provider_name());

    let app = routes::create_router(state);

    info!("minishop starting on http://{}", addr);

    if !is_prod {
        info!("Catalog: GET http://{}/", addr);
        info!("Checkout: POST http://{}/create-checkout-session", addr);
        info!("Webhook: POST http://{}/webhook/stripe", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
