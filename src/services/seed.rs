// src/services/seed.rs

//! Startup loading of the quiz question bank.

use std::path::Path;

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::SeedQuestion,
    store::{self, questions},
};

/// Parses and validates a JSON array of questions.
pub fn parse_question_bank(json: &str) -> Result<Vec<SeedQuestion>, AppError> {
    let bank: Vec<SeedQuestion> = serde_json::from_str(json)?;

    for (index, question) in bank.iter().enumerate() {
        question
            .validate()
            .map_err(|e| AppError::BadRequest(format!("question #{}: {}", index, e)))?;
    }

    Ok(bank)
}

pub async fn load_question_bank(path: impl AsRef<Path>) -> Result<Vec<SeedQuestion>, AppError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::InternalServerError(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_question_bank(&json)
}

/// Inserts the bank if the question table is empty.
/// Returns the number of questions inserted (0 when content already exists).
pub async fn seed_questions(pool: &SqlitePool, bank: &[SeedQuestion]) -> Result<usize, AppError> {
    if questions::count(pool).await? > 0 {
        tracing::info!("Question table already populated, skipping seed");
        return Ok(0);
    }

    let mut tx = store::begin_write(pool).await?;
    for question in bank {
        questions::insert(&mut *tx, question).await?;
    }
    tx.commit().await?;

    tracing::info!(count = bank.len(), "Seeded quiz questions");
    Ok(bank.len())
}
