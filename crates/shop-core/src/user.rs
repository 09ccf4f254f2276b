//! Registered user accounts.

use serde::{Deserialize, Serialize};

/// A registered account. Created at registration, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database id. The account configured as admin may add catalog items.
    pub id: i64,

    /// Unique email address
    pub email: String,

    /// Argon2id PHC hash string, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
}
