//! # shop-stripe
//!
//! Stripe implementation of the minishop checkout gateway.
//!
//! Cart lines reference pre-created Stripe Prices (the catalog's
//! `price_id` column), so a checkout is a single form post to the
//! Checkout Sessions API with `line_items[i][price]` and
//! `line_items[i][quantity]` pairs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeCheckoutGateway;
//! use shop_core::CheckoutGateway;
//!
//! let gateway = StripeCheckoutGateway::from_env()?;
//! let session = gateway
//!     .create_checkout(cart.checkout_lines(), success_url, cancel_url)
//!     .await?;
//! // Redirect the browser to session.checkout_url
//! ```
//!
//! ## Webhooks
//!
//! `verify_webhook` checks the `Stripe-Signature` header (HMAC-SHA256
//! over `"{timestamp}.{payload}"`, five-minute tolerance) before any
//! parsing. Use [`CheckoutCompletedData`] to read the fields of a
//! `checkout.session.completed` event.

pub mod checkout;
pub mod config;
pub mod webhook;

// Re-exports
pub use checkout::StripeCheckoutGateway;
pub use config::StripeConfig;
pub use webhook::CheckoutCompletedData;
