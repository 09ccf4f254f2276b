//! Catalog routes: the item listing and single-item details.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tower_sessions::Session;

use crate::db::ItemRepository;
use crate::error::AppError;
use crate::handlers::cart::load_cart;
use crate::state::AppState;

/// GET / — full catalog plus the visitor's cart count
pub async fn home(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let items = ItemRepository::new(&state.pool).list_all().await?;
    let cart = load_cart(&session).await?;

    Ok(Json(serde_json::json!({
        "items": items,
        "cart_count": cart.len(),
    })))
}

/// GET /itemdetails/{id}
pub async fn item_details(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = ItemRepository::new(&state.pool)
        .get(item_id)
        .await?
        .ok_or(AppError::ItemNotFound(item_id))?;
    let cart = load_cart(&session).await?;

    Ok(Json(serde_json::json!({
        "item": item,
        "cart_count": cart.len(),
    })))
}
