//! # Stripe Webhook Payloads
//!
//! Typed access to the fields of a verified
//! `checkout.session.completed` event. The API layer records an order
//! only when `payment_status` is `paid`.

use shop_core::{CheckoutError, CheckoutResult, WebhookEvent};
use std::collections::HashMap;

/// Parsed checkout.session.completed event data
#[derive(Debug, Clone)]
pub struct CheckoutCompletedData {
    pub session_id: String,
    pub payment_intent_id: Option<String>,
    pub customer_email: Option<String>,
    pub amount_total: i64,
    pub currency: String,
    pub payment_status: String,
    pub metadata: HashMap<String, String>,
}

impl CheckoutCompletedData {
    /// Parse from a verified webhook event
    pub fn from_event(event: &WebhookEvent) -> CheckoutResult<Self> {
        let raw = event
            .raw_data
            .as_ref()
            .ok_or_else(|| CheckoutError::WebhookParseError("Missing raw data".to_string()))?;

        let obj = raw.as_object().ok_or_else(|| {
            CheckoutError::WebhookParseError("Raw data is not an object".to_string())
        })?;

        let session_id = obj
            .get("id")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| CheckoutError::WebhookParseError("Missing session id".to_string()))?;

        let payment_intent_id = obj
            .get("payment_intent")
            .and_then(|v| v.as_str())
            .map(String::from);

        let customer_email = obj
            .get("customer_details")
            .and_then(|cd| cd.get("email"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let amount_total = obj.get("amount_total").and_then(|v| v.as_i64()).unwrap_or(0);

        let currency = obj
            .get("currency")
            .and_then(|v| v.as_str())
            .unwrap_or("usd")
            .to_string();

        let payment_status = obj
            .get("payment_status")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        let metadata = obj
            .get("metadata")
            .and_then(|m| m.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            session_id,
            payment_intent_id,
            customer_email,
            amount_total,
            currency,
            payment_status,
            metadata,
        })
    }

    /// Check if the payment actually settled
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use shop_core::WebhookEventType;

    fn completed_event(payment_status: &str) -> WebhookEvent {
        WebhookEvent {
            event_id: "evt_test".to_string(),
            event_type: WebhookEventType::CheckoutCompleted,
            provider: "stripe".to_string(),
            session_id: Some("cs_test_123".to_string()),
            payment_intent_id: Some("pi_test_456".to_string()),
            customer_email: Some("buyer@example.com".to_string()),
            amount_total: Some(1250),
            currency: Some("usd".to_string()),
            raw_data: Some(json!({
                "id": "cs_test_123",
                "payment_intent": "pi_test_456",
                "customer_details": { "email": "buyer@example.com" },
                "amount_total": 1250,
                "currency": "usd",
                "payment_status": payment_status
            })),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_parse_checkout_completed() {
        let data = CheckoutCompletedData::from_event(&completed_event("paid")).unwrap();

        assert_eq!(data.session_id, "cs_test_123");
        assert_eq!(data.payment_intent_id.as_deref(), Some("pi_test_456"));
        assert_eq!(data.customer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(data.amount_total, 1250);
        assert!(data.is_paid());
    }

    #[test]
    fn test_unpaid_session_is_not_paid() {
        let data = CheckoutCompletedData::from_event(&completed_event("unpaid")).unwrap();
        assert!(!data.is_paid());
    }

    #[test]
    fn test_missing_raw_data_errors() {
        let mut event = completed_event("paid");
        event.raw_data = None;

        assert!(CheckoutCompletedData::from_event(&event).is_err());
    }
}
