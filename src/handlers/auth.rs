// src/handlers/auth.rs

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest},
    services::auth,
    utils::session::{read_session, removal_cookie, session_cookie, sign_session},
};

/// Registers a new user.
///
/// Redirects to the login page on success.
/// Returns 409 if the username is taken and 400 if the form is invalid.
pub async fn register(
    State(pool): State<SqlitePool>,
    Form(payload): Form<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth::register(&pool, &payload).await?;
    Ok(Redirect::to("/login"))
}

/// Authenticates a user and starts a session.
///
/// Sets the signed session cookie and redirects to the dashboard.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let identity = auth::login(&pool, &payload.username, &payload.password).await?;
    let token = sign_session(&identity, &config.session_secret, config.session_ttl)?;

    Ok((jar.add(session_cookie(token)), Redirect::to("/dashboard")))
}

/// Clears the session. Always succeeds.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(removal_cookie()),
        Json(json!({ "message": "Logged out" })),
    )
}

/// Deletes the current account with its scores, then ends the session.
///
/// Only needs a validly signed session: if the account is already gone
/// this still succeeds and clears the cookie.
pub async fn unregister(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let identity =
        read_session(&jar, &config.session_secret).ok_or(AppError::Unauthenticated)?;

    auth::unregister(&pool, identity.user_id).await?;

    Ok((jar.add(removal_cookie()), Redirect::to("/")))
}
