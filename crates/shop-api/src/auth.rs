//! # Authentication Helpers
//!
//! Argon2id password hashing plus the session plumbing for login state
//! and the admin gate. The session stores only the user id; the cart is
//! kept under its own key by the cart handlers.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppConfig;

/// Session key for the logged-in user id
pub const USER_KEY: &str = "user_id";

/// Session key for the serialized cart
pub const CART_KEY: &str = "cart";

/// Hash a password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Id of the logged-in user, if any
pub async fn current_user_id(session: &Session) -> Result<Option<i64>, AppError> {
    Ok(session.get::<i64>(USER_KEY).await?)
}

/// Require a logged-in user
pub async fn require_user(session: &Session) -> Result<i64, AppError> {
    current_user_id(session)
        .await?
        .ok_or(AppError::LoginRequired)
}

/// Require the admin account. Anonymous and non-admin users both get
/// 403, the same response the item-creation route has always given.
pub async fn require_admin(session: &Session, config: &AppConfig) -> Result<i64, AppError> {
    match current_user_id(session).await? {
        Some(id) if id == config.admin_user_id => Ok(id),
        _ => Err(AppError::Forbidden),
    }
}
