// src/handlers/dashboard.rs

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::{
        topic_score::{ScoreDisplayResponse, TopicScoreView},
        user::{DashboardResponse, User},
    },
    store::{questions, scores, users},
    utils::session::{CurrentUser, read_session},
};

/// Landing page. Logged-in users are sent to their dashboard.
pub async fn home(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if read_session(&jar, &config.session_secret).is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let topics = questions::topic_summaries(&pool).await?;
    Ok(Json(json!({
        "message": "Welcome! Register or log in to take a quiz.",
        "topics": topics,
    }))
    .into_response())
}

/// Lists available topics with their question counts.
pub async fn list_topics(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(questions::topic_summaries(&pool).await?))
}

pub async fn health() -> &'static str {
    "ok"
}

/// The session's user, re-read so the score is current.
async fn load_user(pool: &SqlitePool, current: &CurrentUser) -> Result<User, AppError> {
    users::find_by_id(pool, current.id)
        .await?
        .ok_or(AppError::Unauthenticated)
}

pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &current).await?;

    Ok(Json(DashboardResponse {
        username: user.username,
        score: user.score,
    }))
}

/// Aggregate score plus the best score of every topic.
pub async fn display_score(
    State(pool): State<SqlitePool>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &current).await?;
    let topics = scores::for_user(&pool, user.id)
        .await?
        .into_iter()
        .map(TopicScoreView::from)
        .collect();

    Ok(Json(ScoreDisplayResponse {
        username: user.username,
        score: user.score,
        topics,
    }))
}
