// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{config::Config, error::AppError, services::auth};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Session token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub username: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Who a session belongs to, as established at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub username: String,
}

/// The user behind the current request.
/// Inserted into request extensions by [`session_middleware`] once the
/// session has been checked against the store.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Signs a session token for the identity, valid for `ttl_seconds`.
pub fn sign_session(
    identity: &SessionIdentity,
    secret: &str,
    ttl_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + ttl_seconds as usize;

    let claims = Claims {
        sub: identity.user_id.to_string(),
        username: identity.username.clone(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies a session token. Any defect (bad signature, expired, malformed
/// subject) is reported as `Unauthenticated`.
pub fn verify_session(token: &str, secret: &str) -> Result<SessionIdentity, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthenticated)?;

    Ok(SessionIdentity {
        user_id,
        username: token_data.claims.username,
    })
}

/// Reads and verifies the session cookie, if any.
pub fn read_session(jar: &CookieJar, secret: &str) -> Option<SessionIdentity> {
    let token = jar.get(SESSION_COOKIE)?;
    verify_session(token.value(), secret).ok()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// An already-expired session cookie, used to clear the browser's copy.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Axum Middleware: session gate for protected routes.
///
/// Verifies the session cookie and resolves its user in the store.
/// On success injects [`CurrentUser`] into the request extensions.
/// On failure answers with a redirect to `/login` and clears the cookie.
pub async fn session_middleware(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(AppError::Unauthenticated)?;

    let identity = verify_session(&token, &config.session_secret)?;
    let user = auth::require_session(&pool, &identity).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
