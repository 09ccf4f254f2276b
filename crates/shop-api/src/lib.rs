//! # shop-api
//!
//! HTTP layer for minishop-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Catalog, cart, account and admin routes
//! - Hosted-checkout redirect flow and the Stripe webhook intake
//! - SQLite persistence for users, items and orders
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Catalog listing |
//! | GET | `/health` | Health check |
//! | GET | `/cart` | Cart contents |
//! | GET | `/itemdetails/{id}` | Item details |
//! | POST | `/login` | Log in |
//! | POST | `/register` | Register |
//! | GET | `/logout` | Log out |
//! | GET/POST | `/additem` | Admin: list / create items |
//! | POST | `/add-to-cart/{id}` | Add an item to the cart |
//! | POST | `/clear-cart` | Empty the cart |
//! | POST | `/create-checkout-session` | Redirect to hosted checkout |
//! | GET | `/success` | Payment success return |
//! | GET | `/cancel` | Payment cancel return |
//! | POST | `/webhook/stripe` | Stripe webhook |

pub mod auth;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{AppError, ErrorResponse};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
