//! # Checkout Gateway Trait
//!
//! Seam between the shop and its hosted-checkout provider. The shop
//! builds a list of checkout lines plus success/cancel callback URLs;
//! the gateway answers with a redirect URL to the provider's hosted
//! payment page. Implementations: Stripe (shop-stripe).

use crate::cart::CheckoutEntry;
use crate::error::CheckoutResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait implemented by hosted-checkout providers.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session for the given cart lines.
    ///
    /// # Arguments
    /// * `lines` - Checkout-cart entries (price id + quantity)
    /// * `success_url` - URL the provider redirects to after payment
    /// * `cancel_url` - URL the provider redirects to on cancel
    async fn create_checkout(
        &self,
        lines: &[CheckoutEntry],
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession>;

    /// Verify a webhook signature and parse the event.
    async fn verify_webhook(&self, payload: &[u8], signature: &str)
        -> CheckoutResult<WebhookEvent>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared, dynamically dispatched gateway
pub type BoxedCheckoutGateway = Arc<dyn CheckoutGateway>;

/// Status of a hosted checkout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// Session created, awaiting payment
    Open,
    /// Payment completed successfully
    Complete,
    /// Session expired
    Expired,
}

impl Default for CheckoutStatus {
    fn default() -> Self {
        CheckoutStatus::Open
    }
}

/// A checkout session created by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session id
    pub session_id: String,

    /// Provider name (e.g. "stripe")
    pub provider: String,

    /// URL to redirect the browser to
    pub checkout_url: String,

    /// Session status
    #[serde(default)]
    pub status: CheckoutStatus,

    /// When the session expires, if the provider says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(
        session_id: impl Into<String>,
        provider: impl Into<String>,
        checkout_url: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider: provider.into(),
            checkout_url: checkout_url.into(),
            status: CheckoutStatus::Open,
            expires_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Webhook event types the shop reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed
    CheckoutCompleted,
    /// Payment succeeded
    PaymentSucceeded,
    /// Payment failed
    PaymentFailed,
    /// Unknown event (passthrough)
    Unknown(String),
}

/// A verified, parsed webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event id from the provider
    pub event_id: String,

    /// Event type
    pub event_type: WebhookEventType,

    /// Provider name
    pub provider: String,

    /// Related session id (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Related payment intent id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,

    /// Customer email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Amount paid, in the currency's smallest unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total: Option<i64>,

    /// Lowercase ISO 4217 currency code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Raw event object, for provider-specific parsing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

/// Success/cancel callback URLs for checkout
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the shop (e.g. "https://shop.example.com")
    pub base_url: String,
    /// Success page path
    pub success_path: String,
    /// Cancel page path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            success_path: "/success".to_string(),
            cancel_path: "/cancel".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }

    /// Success URL with the provider's session-id placeholder appended
    pub fn success_url_with_session(&self) -> String {
        format!("{}?session_id={{CHECKOUT_SESSION_ID}}", self.success_url())
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
