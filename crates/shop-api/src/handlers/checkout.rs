//! Checkout routes: hosted-session creation, the success/cancel
//! returns and the Stripe webhook intake.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use shop_core::WebhookEventType;
use shop_stripe::CheckoutCompletedData;
use std::collections::HashMap;
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::handlers::cart::{load_cart, save_cart};
use crate::state::AppState;

/// POST /create-checkout-session
///
/// An empty cart is rejected up front; the gateway is never called for
/// it. Otherwise the browser is sent to the provider's hosted page with
/// a 303.
#[instrument(skip(state, session))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let cart = load_cart(&session).await?;

    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let checkout = state
        .gateway
        .create_checkout(
            cart.checkout_lines(),
            &state.success_url(),
            &state.cancel_url(),
        )
        .await?;

    info!(
        "created checkout session {} for {} lines",
        checkout.session_id,
        cart.len()
    );

    Ok(Redirect::to(&checkout.checkout_url))
}

/// GET /success — payment return; clears this session's cart
pub async fn success(
    session: Session,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    let session_id = params
        .get("session_id")
        .map(|s| s.as_str())
        .unwrap_or("unknown");

    Ok(Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Successful</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Payment Successful!</h1>
        <p>Session: <code>{session_id}</code></p>
        <p>Thank you for your purchase.</p>
    </div>
</body>
</html>
"#
    )))
}

/// GET /cancel — payment abandoned; the cart is kept
pub async fn cancel() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Payment Cancelled</h1>
        <p>No charges were made. Your cart is unchanged.</p>
    </div>
</body>
</html>
"#,
    )
}

/// POST /webhook/stripe
///
/// Verifies the signature, then records an order for a settled
/// checkout. Unhandled event types are acknowledged so the provider
/// stops retrying them.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Validation("Missing Stripe-Signature header".to_string())
        })?;

    let event = state.gateway.verify_webhook(&body, signature).await?;

    info!(
        "received webhook: type={:?}, id={}",
        event.event_type, event.event_id
    );

    match &event.event_type {
        WebhookEventType::CheckoutCompleted => {
            let data = CheckoutCompletedData::from_event(&event).map_err(|e| {
                error!("webhook payload parse failed: {e}");
                AppError::Checkout(e)
            })?;

            if data.is_paid() {
                let written = OrderRepository::new(&state.pool)
                    .record(
                        &data.session_id,
                        data.payment_intent_id.as_deref(),
                        data.customer_email.as_deref(),
                        data.amount_total,
                        &data.currency,
                    )
                    .await?;

                if written {
                    info!(
                        "recorded order for session {} ({} {})",
                        data.session_id, data.amount_total, data.currency
                    );
                }
            } else {
                warn!(
                    "checkout {} completed with payment_status={}, not recording",
                    data.session_id, data.payment_status
                );
            }
        }
        WebhookEventType::PaymentFailed => {
            warn!("payment failed: {:?}", event.payment_intent_id);
        }
        _ => {}
    }

    Ok(StatusCode::OK)
}
