//! Cart routes.
//!
//! The cart lives in the visitor's session under [`CART_KEY`], so each
//! browser session gets its own cart and nothing is shared between
//! concurrent visitors.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use shop_core::Cart;
use tower_sessions::Session;

use crate::auth::CART_KEY;
use crate::db::ItemRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Read the session cart, defaulting to empty
pub async fn load_cart(session: &Session) -> Result<Cart, AppError> {
    Ok(session.get::<Cart>(CART_KEY).await?.unwrap_or_default())
}

/// Write the cart back into the session
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session.insert(CART_KEY, cart).await?;
    Ok(())
}

/// GET /cart — the display-cart entries
pub async fn view_cart(session: Session) -> Result<impl IntoResponse, AppError> {
    let cart = load_cart(&session).await?;

    Ok(Json(serde_json::json!({
        "items": cart.display_lines(),
        "cart_count": cart.len(),
    })))
}

/// POST /add-to-cart/{id} — copy the item into both cart lists
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = ItemRepository::new(&state.pool)
        .get(item_id)
        .await?
        .ok_or(AppError::ItemNotFound(item_id))?;

    let mut cart = load_cart(&session).await?;
    cart.add(&item);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// POST /clear-cart — empty both cart lists
pub async fn clear_cart(session: Session) -> Result<impl IntoResponse, AppError> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}
