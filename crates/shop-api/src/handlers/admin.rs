//! Admin routes: the item-creation form backing.
//!
//! Both verbs of /additem go through [`auth::require_admin`]; only the
//! configured admin account may see or extend the catalog this way.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use shop_core::NewItem;
use tower_sessions::Session;
use tracing::info;

use crate::auth;
use crate::db::ItemRepository;
use crate::error::AppError;
use crate::state::AppState;

/// GET /additem — the current catalog, for the admin form page
pub async fn list_items(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    auth::require_admin(&session, &state.config).await?;

    let items = ItemRepository::new(&state.pool).list_all().await?;

    Ok(Json(serde_json::json!({ "items": items })))
}

/// POST /additem — validate and insert a new catalog item
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewItem>,
) -> Result<impl IntoResponse, AppError> {
    auth::require_admin(&session, &state.config).await?;

    form.validate().map_err(AppError::Validation)?;

    let item = ItemRepository::new(&state.pool).insert(&form).await?;
    info!("added catalog item {} ({})", item.id, item.name);

    Ok(Redirect::to("/additem"))
}
