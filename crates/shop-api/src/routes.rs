//! # Routes
//!
//! Axum router configuration. A cookie session layer scopes the cart
//! and login state to each visitor; the webhook route sits under the
//! same router but carries no session state of its own.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::handlers::{self, account, admin, cart, catalog, checkout};
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.is_production());

    Router::new()
        .route("/", get(catalog::home))
        .route("/health", get(handlers::health))
        .route("/itemdetails/{item_id}", get(catalog::item_details))
        .route("/cart", get(cart::view_cart))
        .route("/add-to-cart/{item_id}", post(cart::add_to_cart))
        .route("/clear-cart", post(cart::clear_cart))
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/logout", get(account::logout))
        .route("/additem", get(admin::list_items).post(admin::add_item))
        .route(
            "/create-checkout-session",
            post(checkout::create_checkout_session),
        )
        .route("/success", get(checkout::success))
        .route("/cancel", get(checkout::cancel))
        .route("/webhook/stripe", post(checkout::stripe_webhook))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
