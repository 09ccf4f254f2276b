//! Account routes: register, login, logout.
//!
//! Login failures answer with one generic message whether the email is
//! unknown or the password is wrong, so accounts cannot be enumerated.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::auth::{self, USER_KEY};
use crate::db::UserRepository;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = form.email.trim().to_lowercase();
    if email.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation("email and password are required".to_string()));
    }

    let users = UserRepository::new(&state.pool);

    // Duplicate email is checked before insert; the UNIQUE constraint
    // backstops concurrent registrations.
    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }

    let password_hash = auth::hash_password(&form.password)?;
    let user = users.create(&email, &password_hash).await?;

    info!("registered user {}", user.id);
    session.insert(USER_KEY, user.id).await?;

    Ok(Redirect::to("/"))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let email = form.email.trim().to_lowercase();

    let user = UserRepository::new(&state.pool)
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth::verify_password(&form.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    session.insert(USER_KEY, user.id).await?;

    Ok(Redirect::to("/"))
}

/// GET /logout — requires a logged-in user; the cart survives logout
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    auth::require_user(&session).await?;
    session.remove::<i64>(USER_KEY).await?;

    Ok(Redirect::to("/"))
}
