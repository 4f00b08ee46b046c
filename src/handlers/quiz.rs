// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::question::{PublicQuestion, QuizResponse},
    services::scoring,
    store::questions,
    utils::session::CurrentUser,
};

/// Returns the questions of a topic without their correct options.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = questions::for_topic(&pool, &topic).await?;

    if quiz.is_empty() {
        return Err(AppError::NotFound(format!("Topic '{}' not found", topic)));
    }

    Ok(Json(QuizResponse {
        topic,
        questions: quiz.into_iter().map(PublicQuestion::from).collect(),
    }))
}

/// Grades a submitted quiz.
///
/// * Reads `question_<id>=<option>` form fields.
/// * Scores the attempt against every question of the topic.
/// * Raises the stored topic best and the aggregate score if beaten.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Extension(user): Extension<CurrentUser>,
    Path(topic): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let answers = scoring::parse_answers(&form);
    let result = scoring::submit_attempt(&pool, user.id, &topic, &answers).await?;
    Ok(Json(result))
}
