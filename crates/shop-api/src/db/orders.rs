//! Order repository.
//!
//! Orders are written from the webhook path when a checkout session
//! settles. Stripe retries webhook delivery, so the insert ignores
//! duplicate session ids.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

/// A settled checkout recorded from the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub session_id: String,
    pub payment_intent: Option<String>,
    pub customer_email: Option<String>,
    pub amount_total: i64,
    pub currency: String,
    pub created_at: String,
}

/// Repository for order records
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a settled checkout. Returns true if a row was written,
    /// false when the session id was already recorded.
    pub async fn record(
        &self,
        session_id: &str,
        payment_intent: Option<&str>,
        customer_email: Option<&str>,
        amount_total: i64,
        currency: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO orders
                (session_id, payment_intent, customer_email, amount_total, currency, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session_id)
        .bind(payment_intent)
        .bind(customer_email)
        .bind(amount_total)
        .bind(currency)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_session(&self, session_id: &str) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, session_id, payment_intent, customer_email, amount_total, currency, created_at
            FROM orders WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_record_and_find() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(&pool);

        let written = repo
            .record("cs_1", Some("pi_1"), Some("a@example.com"), 1250, "usd")
            .await
            .unwrap();
        assert!(written);

        let order = repo.find_by_session("cs_1").await.unwrap().unwrap();
        assert_eq!(order.amount_total, 1250);
        assert_eq!(order.currency, "usd");
    }

    #[tokio::test]
    async fn test_webhook_retries_are_deduplicated() {
        let pool = test_pool().await;
        let repo = OrderRepository::new(&pool);

        assert!(repo.record("cs_1", None, None, 100, "usd").await.unwrap());
        assert!(!repo.record("cs_1", None, None, 100, "usd").await.unwrap());
    }
}
