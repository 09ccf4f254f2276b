//! # Stripe Checkout Sessions
//!
//! Hosted checkout via Stripe's Checkout Sessions API. Every cart line
//! references a pre-created Stripe Price, so the form body is a list of
//! `line_items[i][price]` / `line_items[i][quantity]` pairs in payment
//! mode.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shop_core::{
    CheckoutEntry, CheckoutError, CheckoutGateway, CheckoutResult, CheckoutSession,
    CheckoutStatus, WebhookEvent, WebhookEventType,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Stripe hosted-checkout gateway
pub struct StripeCheckoutGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutGateway {
    /// Create a new gateway from explicit config
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CheckoutError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    /// Build the form body for the Checkout Sessions API
    fn build_form(
        lines: &[CheckoutEntry],
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (i, line) in lines.iter().enumerate() {
            form_params.push((format!("line_items[{i}][price]"), line.price_id.clone()));
            form_params.push((
                format!("line_items[{i}][quantity]"),
                line.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    async fn create_checkout(
        &self,
        lines: &[CheckoutEntry],
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        if lines.is_empty() {
            return Err(CheckoutError::InvalidRequest(
                "Cart has no items".to_string(),
            ));
        }

        let form_params = Self::build_form(lines, success_url, cancel_url);
        let idempotency_key = Uuid::new_v4().to_string();

        debug!("Creating Stripe checkout session: {} lines", lines.len());

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                CheckoutError::Serialization(format!("Failed to parse Stripe response: {e}"))
            })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, session_response.url
        );

        let expires_at = session_response
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0));

        Ok(CheckoutSession {
            session_id: session_response.id,
            provider: "stripe".to_string(),
            checkout_url: session_response.url,
            status: CheckoutStatus::Open,
            expires_at,
            created_at: Utc::now(),
        })
    }

    #[instrument(skip(self, payload, signature))]
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> CheckoutResult<WebhookEvent> {
        let sig_parts = parse_signature_header(signature)?;

        // Reject replays: timestamp must be within 5 minutes
        let now = Utc::now().timestamp();
        let tolerance = 300;

        if (now - sig_parts.timestamp).abs() > tolerance {
            return Err(CheckoutError::WebhookVerificationFailed(
                "Timestamp outside tolerance".to_string(),
            ));
        }

        let signed_payload = format!(
            "{}.{}",
            sig_parts.timestamp,
            String::from_utf8_lossy(payload)
        );
        let expected_sig = compute_hmac_sha256(&self.config.webhook_secret, &signed_payload);

        let valid = sig_parts
            .signatures
            .iter()
            .any(|sig| constant_time_compare(sig, &expected_sig));

        if !valid {
            return Err(CheckoutError::WebhookVerificationFailed(
                "Signature mismatch".to_string(),
            ));
        }

        let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            CheckoutError::WebhookParseError(format!("Failed to parse webhook: {e}"))
        })?;

        debug!("Verified Stripe webhook: type={}", event.event_type);

        let event_type = match event.event_type.as_str() {
            "checkout.session.completed" => WebhookEventType::CheckoutCompleted,
            "payment_intent.succeeded" => WebhookEventType::PaymentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let session_id = event
            .data
            .object
            .get("id")
            .and_then(|v| v.as_str())
            .map(String::from);

        let payment_intent_id = event
            .data
            .object
            .get("payment_intent")
            .and_then(|v| v.as_str())
            .map(String::from);

        let customer_email = event
            .data
            .object
            .get("customer_details")
            .and_then(|cd| cd.get("email"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let amount_total = event.data.object.get("amount_total").and_then(|v| v.as_i64());

        let currency = event
            .data
            .object
            .get("currency")
            .and_then(|v| v.as_str())
            .map(String::from);

        Ok(WebhookEvent {
            event_id: event.id,
            event_type,
            provider: "stripe".to_string(),
            session_id,
            payment_intent_id,
            customer_email,
            amount_total,
            currency,
            raw_data: Some(serde_json::Value::Object(event.data.object)),
            timestamp: DateTime::from_timestamp(event.created, 0).unwrap_or_else(Utc::now),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Webhook Signature Verification
// =============================================================================

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> CheckoutResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let kv: Vec<&str> = part.split('=').collect();
        if kv.len() != 2 {
            continue;
        }
        match kv[0] {
            "t" => {
                timestamp = kv[1].parse().ok();
            }
            "v1" => {
                signatures.push(kv[1].to_string());
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        CheckoutError::WebhookVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(CheckoutError::WebhookVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lines() -> Vec<CheckoutEntry> {
        vec![
            CheckoutEntry {
                price_id: "price_mug".to_string(),
                quantity: 1,
            },
            CheckoutEntry {
                price_id: "price_shirt".to_string(),
                quantity: 1,
            },
        ]
    }

    #[test]
    fn test_build_form_encodes_price_ids() {
        let form = StripeCheckoutGateway::build_form(
            &lines(),
            "https://shop.test/success",
            "https://shop.test/cancel",
        );

        assert!(form.contains(&("mode".to_string(), "payment".to_string())));
        assert!(form.contains(&("line_items[0][price]".to_string(), "price_mug".to_string())));
        assert!(form.contains(&("line_items[1][price]".to_string(), "price_shirt".to_string())));
        assert!(form.contains(&("line_items[1][quantity]".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_without_network() {
        // No mock server: any network call would fail loudly
        let config = StripeConfig::new("sk_test_abc", "whsec_x")
            .with_api_base_url("http://127.0.0.1:1");
        let gateway = StripeCheckoutGateway::new(config).unwrap();

        let err = gateway
            .create_checkout(&[], "https://s", "https://c")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_create_checkout_parses_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc"))
            .and(body_string_contains("price_mug"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123",
                "expires_at": 1_900_000_000
            })))
            .mount(&server)
            .await;

        let config =
            StripeConfig::new("sk_test_abc", "whsec_x").with_api_base_url(server.uri());
        let gateway = StripeCheckoutGateway::new(config).unwrap();

        let session = gateway
            .create_checkout(&lines(), "https://shop.test/success", "https://shop.test/cancel")
            .await
            .unwrap();

        assert_eq!(session.session_id, "cs_test_123");
        assert_eq!(
            session.checkout_url,
            "https://checkout.stripe.com/c/pay/cs_test_123"
        );
        assert_eq!(session.status, CheckoutStatus::Open);
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_provider_error_is_classified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "No such price: price_mug" }
            })))
            .mount(&server)
            .await;

        let config =
            StripeConfig::new("sk_test_abc", "whsec_x").with_api_base_url(server.uri());
        let gateway = StripeCheckoutGateway::new(config).unwrap();

        let err = gateway
            .create_checkout(&lines(), "https://s", "https://c")
            .await
            .unwrap_err();

        match err {
            CheckoutError::Provider { provider, message } => {
                assert_eq!(provider, "stripe");
                assert!(message.contains("No such price"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_signature_header() {
        let header = "t=1234567890,v1=abc123,v1=def456";
        let parsed = parse_signature_header(header).unwrap();

        assert_eq!(parsed.timestamp, 1234567890);
        assert_eq!(parsed.signatures.len(), 2);
        assert_eq!(parsed.signatures[0], "abc123");
    }

    #[test]
    fn test_hmac_sha256() {
        let sig = compute_hmac_sha256("whsec_test", "1234567890.{}");

        // 64-character hex string
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }

    #[tokio::test]
    async fn test_verify_webhook_roundtrip() {
        let config = StripeConfig::new("sk_test_abc", "whsec_testsecret");
        let gateway = StripeCheckoutGateway::new(config).unwrap();

        let payload = json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": Utc::now().timestamp(),
            "data": { "object": {
                "id": "cs_test_123",
                "payment_intent": "pi_test_456",
                "amount_total": 1250,
                "currency": "usd",
                "payment_status": "paid"
            }}
        })
        .to_string();

        let ts = Utc::now().timestamp();
        let sig = compute_hmac_sha256("whsec_testsecret", &format!("{ts}.{payload}"));
        let header = format!("t={ts},v1={sig}");

        let event = gateway
            .verify_webhook(payload.as_bytes(), &header)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::CheckoutCompleted);
        assert_eq!(event.session_id.as_deref(), Some("cs_test_123"));
        assert_eq!(event.amount_total, Some(1250));
    }

    #[tokio::test]
    async fn test_verify_webhook_bad_signature() {
        let config = StripeConfig::new("sk_test_abc", "whsec_testsecret");
        let gateway = StripeCheckoutGateway::new(config).unwrap();

        let ts = Utc::now().timestamp();
        let header = format!("t={ts},v1=deadbeef");

        let err = gateway
            .verify_webhook(b"{}", &header)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::WebhookVerificationFailed(_)));
    }
}
