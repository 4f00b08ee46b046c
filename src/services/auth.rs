// src/services/auth.rs

//! Account lifecycle and session checks.

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::RegisterRequest,
    store::{self, StoreError, questions, scores, users},
    utils::{
        hash::{hash_password, verify_password},
        session::{CurrentUser, SessionIdentity},
    },
};

/// Registers a new account and returns its id.
///
/// The user row and one unattempted score row per existing topic are
/// written in a single transaction. A username that is already taken,
/// whether caught by the lookup or by the UNIQUE constraint during a
/// concurrent registration, yields `AccountExists`.
pub async fn register(pool: &SqlitePool, req: &RegisterRequest) -> Result<i64, AppError> {
    req.validate()?;

    if users::find_by_username(pool, &req.username).await?.is_some() {
        return Err(AppError::AccountExists);
    }

    let password = req.password.clone();
    let hashed_password = run_blocking(move || hash_password(&password)).await?;

    let mut tx = store::begin_write(pool).await?;

    let user = users::insert(&mut *tx, &req.username, &hashed_password)
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => AppError::AccountExists,
            other => {
                tracing::error!("Failed to register user: {:?}", other);
                AppError::from(other)
            }
        })?;

    let topics = questions::distinct_topics(&mut *tx).await?;
    for topic in &topics {
        scores::insert(&mut *tx, user.id, topic, None).await?;
    }

    tx.commit().await?;

    tracing::info!(user_id = user.id, topics = topics.len(), "User registered");
    Ok(user.id)
}

/// Checks credentials and returns the identity to store in the session.
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<SessionIdentity, AppError> {
    let user = users::find_by_username(pool, username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let (password, hash) = (password.to_string(), user.password.clone());
    if !run_blocking(move || verify_password(&password, &hash)).await? {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(SessionIdentity {
        user_id: user.id,
        username: user.username,
    })
}

/// Runs CPU-heavy password work on the blocking thread pool.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("Password task failed: {}", e);
        AppError::InternalServerError(e.to_string())
    })?
}

/// Resolves a verified session to a stored user.
/// A session whose user has since been deleted is `Unauthenticated`.
pub async fn require_session(
    pool: &SqlitePool,
    identity: &SessionIdentity,
) -> Result<CurrentUser, AppError> {
    match users::find_by_id(pool, identity.user_id).await? {
        Some(user) => Ok(CurrentUser {
            id: user.id,
            username: user.username,
        }),
        None => {
            tracing::warn!(user_id = identity.user_id, "Session refers to a deleted user");
            Err(AppError::Unauthenticated)
        }
    }
}

/// Deletes the account and all of its topic scores.
///
/// Returns false when the user was already gone, which is not an error.
pub async fn unregister(pool: &SqlitePool, user_id: i64) -> Result<bool, AppError> {
    let mut tx = store::begin_write(pool).await?;

    let removed_scores = scores::delete_for_user(&mut *tx, user_id).await?;
    let removed = users::delete(&mut *tx, user_id).await?;

    tx.commit().await?;

    if removed {
        tracing::info!(user_id, removed_scores, "User unregistered");
    } else {
        tracing::debug!(user_id, "Unregister for missing user");
    }
    Ok(removed)
}
