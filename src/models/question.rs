// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Represents the 'quiz_questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,

    /// Topic label the question belongs to, e.g. `joins`.
    pub topic: String,

    pub question: String,

    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,

    /// 1-based index of the correct option.
    pub correct_option: i64,
}

/// DTO for sending a question to the client (excludes the correct option).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: [String; 4],
}

impl From<QuizQuestion> for PublicQuestion {
    fn from(q: QuizQuestion) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: [q.option1, q.option2, q.option3, q.option4],
        }
    }
}

/// Response body of `GET /quiz/{topic}`.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub topic: String,
    pub questions: Vec<PublicQuestion>,
}

/// A topic label with the number of questions it holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub questions: i64,
}

/// One entry of a JSON question bank used for seeding.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeedQuestion {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,
    #[validate(length(min = 1, max = 255))]
    pub question: String,
    #[validate(custom(function = validate_options))]
    pub options: [String; 4],
    #[validate(range(min = 1, max = 4))]
    pub correct_option: i64,
}

fn validate_options(options: &[String; 4]) -> Result<(), ValidationError> {
    for opt in options {
        if opt.trim().is_empty() {
            return Err(ValidationError::new("option_cannot_be_empty"));
        }
        if opt.chars().count() > 100 {
            return Err(ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}
