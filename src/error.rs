// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use std::fmt;

use crate::{store::StoreError, utils::session::removal_cookie};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 409 Conflict, registration with a taken username
    AccountExists,

    // 401 Unauthorized, wrong username or password
    InvalidCredentials,

    // 303 See Other to the login page; the session cookie is cleared
    Unauthenticated,

    // 404 Not Found
    NotFound(String),

    // 409 Conflict for uniqueness violations with no domain meaning
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::AccountExists => write!(f, "Account already exists"),
            AppError::InvalidCredentials => write!(f, "Invalid username or password"),
            AppError::Unauthenticated => write!(f, "Login required"),
            other => write!(f, "{:?}", other),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code,
/// or a redirect to the login page for missing sessions.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthenticated => {
                let jar = CookieJar::new().add(removal_cookie());
                return (jar, Redirect::to("/login")).into_response();
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AccountExists => (StatusCode::CONFLICT, AppError::AccountExists.to_string()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                AppError::InvalidCredentials.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` on transaction begin/commit.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(msg) => AppError::Conflict(msg),
            StoreError::Database(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
