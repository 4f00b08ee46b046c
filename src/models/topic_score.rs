// src/models/topic_score.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'user_topic_scores' table in the database.
/// One row per (user, topic) holding the best score achieved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserTopicScore {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,

    /// `None` until the topic has been attempted once.
    pub score: Option<i64>,
}

/// Per-topic entry of the score page. Unattempted topics show 0.
#[derive(Debug, Serialize)]
pub struct TopicScoreView {
    pub topic: String,
    pub score: i64,
    pub attempted: bool,
}

impl From<UserTopicScore> for TopicScoreView {
    fn from(row: UserTopicScore) -> Self {
        Self {
            topic: row.topic,
            score: row.score.unwrap_or(0),
            attempted: row.score.is_some(),
        }
    }
}

/// Response body of `GET /display_score`.
#[derive(Debug, Serialize)]
pub struct ScoreDisplayResponse {
    pub username: String,
    pub score: i64,
    pub topics: Vec<TopicScoreView>,
}

/// Outcome of a quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub topic: String,
    /// Best score stored before this attempt (0 if never attempted).
    pub previous_score: i64,
    pub current_score: i64,
    /// Number of questions in the topic.
    pub total: i64,
    /// Amount added to the aggregate score.
    pub delta: i64,
    /// Aggregate score after the attempt.
    pub score: i64,
}
