//! User repository.
//!
//! Duplicate registration is handled by looking the email up before
//! inserting; the UNIQUE constraint on `email` backstops races.

use shop_core::User;
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

/// Repository for user database operations
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Insert a new user and return it with its assigned id
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES (?, ?)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await?;

        Ok(User::from(row))
    }
}
