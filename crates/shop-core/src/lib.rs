//! # shop-core
//!
//! Core types for the minishop storefront.
//!
//! This crate provides:
//! - `Item` and `NewItem` for the catalog
//! - `Cart` with its paired display/checkout line lists
//! - `User` for registered accounts
//! - `CheckoutGateway` trait for hosted-checkout providers
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Cart, CheckoutGateway, CheckoutUrls};
//!
//! let mut cart = Cart::new();
//! cart.add(&item);
//!
//! let urls = CheckoutUrls::new("https://shop.example.com");
//! let session = gateway
//!     .create_checkout(cart.checkout_lines(), &urls.success_url_with_session(), &urls.cancel_url())
//!     .await?;
//!
//! // Redirect the browser to session.checkout_url
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod item;
pub mod user;

// Re-exports for convenience
pub use cart::{Cart, CheckoutEntry, DisplayEntry};
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{
    BoxedCheckoutGateway, CheckoutGateway, CheckoutSession, CheckoutStatus, CheckoutUrls,
    WebhookEvent, WebhookEventType,
};
pub use item::{Item, NewItem};
pub use user::User;
