// src/services/scoring.rs

//! Quiz grading and best-score bookkeeping.
//!
//! A user's aggregate score is the sum of their best score in every topic.
//! It is maintained incrementally: a submission only ever adds the amount by
//! which it beats the stored best for its topic.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{question::QuizQuestion, topic_score::QuizResult},
    store::{self, questions, scores, users},
};

/// Form field prefix of a submitted answer: `question_<id>=<option>`.
const ANSWER_FIELD_PREFIX: &str = "question_";

/// What to write to the (user, topic) row after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicWrite {
    /// No row existed yet.
    Insert(i64),
    /// Row exists and gets a new best (or its first score).
    Update(i64),
    /// Stored best stands.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub previous_score: i64,
    pub write: TopicWrite,
    pub delta: i64,
}

/// Extracts `question_<id>` fields from a submitted form. Other fields and
/// unparsable ids are ignored.
pub fn parse_answers(form: &HashMap<String, String>) -> HashMap<i64, String> {
    form.iter()
        .filter_map(|(key, value)| {
            let id = key.strip_prefix(ANSWER_FIELD_PREFIX)?.parse::<i64>().ok()?;
            Some((id, value.clone()))
        })
        .collect()
}

/// Counts the questions whose submitted option equals the correct marker.
/// Missing and malformed answers count as wrong.
pub fn score_attempt(questions: &[QuizQuestion], answers: &HashMap<i64, String>) -> i64 {
    questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .and_then(|ans| ans.trim().parse::<i64>().ok())
                .is_some_and(|selected| selected == q.correct_option)
        })
        .count() as i64
}

/// Decides the row write and aggregate delta for an attempt.
///
/// `stored` is `None` when no row exists, `Some(None)` for an unattempted
/// placeholder. Both count as a previous score of 0.
pub fn reconcile(stored: Option<Option<i64>>, current_score: i64) -> Reconciliation {
    match stored {
        None => Reconciliation {
            previous_score: 0,
            write: TopicWrite::Insert(current_score),
            delta: current_score,
        },
        Some(None) => Reconciliation {
            previous_score: 0,
            write: TopicWrite::Update(current_score),
            delta: current_score,
        },
        Some(Some(previous_score)) if current_score > previous_score => Reconciliation {
            previous_score,
            write: TopicWrite::Update(current_score),
            delta: current_score - previous_score,
        },
        Some(Some(previous_score)) => Reconciliation {
            previous_score,
            write: TopicWrite::Keep,
            delta: 0,
        },
    }
}

/// Grades an attempt and records it.
///
/// The topic row and the aggregate score are updated in one transaction;
/// if any step fails the transaction is dropped and nothing is written.
pub async fn submit_attempt(
    pool: &SqlitePool,
    user_id: i64,
    topic: &str,
    answers: &HashMap<i64, String>,
) -> Result<QuizResult, AppError> {
    let quiz = questions::for_topic(pool, topic).await?;
    if quiz.is_empty() {
        return Err(AppError::NotFound(format!("Topic '{}' not found", topic)));
    }

    let current_score = score_attempt(&quiz, answers);
    let total = quiz.len() as i64;

    let mut tx = store::begin_write(pool).await?;

    if users::find_by_id(&mut *tx, user_id).await?.is_none() {
        return Err(AppError::Unauthenticated);
    }

    let stored = scores::find(&mut *tx, user_id, topic).await?;
    let outcome = reconcile(stored.map(|row| row.score), current_score);

    match outcome.write {
        TopicWrite::Insert(score) => scores::insert(&mut *tx, user_id, topic, Some(score)).await?,
        TopicWrite::Update(score) => scores::update(&mut *tx, user_id, topic, score).await?,
        TopicWrite::Keep => {}
    }

    if outcome.delta > 0 {
        users::add_score(&mut *tx, user_id, outcome.delta).await?;
    }

    let aggregate = users::find_by_id(&mut *tx, user_id)
        .await?
        .map(|u| u.score)
        .ok_or(AppError::Unauthenticated)?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        topic,
        current_score,
        previous_score = outcome.previous_score,
        delta = outcome.delta,
        "Quiz submitted"
    );

    Ok(QuizResult {
        topic: topic.to_string(),
        previous_score: outcome.previous_score,
        current_score,
        total,
        delta: outcome.delta,
        score: aggregate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct_option: i64) -> QuizQuestion {
        QuizQuestion {
            id,
            topic: "joins".into(),
            question: format!("Q{id}"),
            option1: "A".into(),
            option2: "B".into(),
            option3: "C".into(),
            option4: "D".into(),
            correct_option,
        }
    }

    fn answers(pairs: &[(i64, &str)]) -> HashMap<i64, String> {
        pairs.iter().map(|(id, v)| (*id, v.to_string())).collect()
    }

    #[test]
    fn scores_matching_markers() {
        let quiz = vec![question(1, 1), question(2, 1), question(3, 1)];
        assert_eq!(score_attempt(&quiz, &answers(&[(1, "1"), (2, "2"), (3, "1")])), 2);
        assert_eq!(score_attempt(&quiz, &answers(&[(1, "2"), (2, "2"), (3, "2")])), 0);
    }

    #[test]
    fn missing_and_malformed_answers_are_wrong() {
        let quiz = vec![question(1, 3), question(2, 4), question(3, 2)];
        let submitted = answers(&[(1, "three"), (2, "99"), (7, "2")]);
        assert_eq!(score_attempt(&quiz, &submitted), 0);
        assert_eq!(score_attempt(&quiz, &HashMap::new()), 0);
    }

    #[test]
    fn parse_answers_keeps_question_fields_only() {
        let form: HashMap<String, String> = [
            ("question_4", "2"),
            ("question_x", "1"),
            ("csrf", "abc"),
            ("question_10", "3"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let parsed = parse_answers(&form);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[&4], "2");
        assert_eq!(parsed[&10], "3");
    }

    #[test]
    fn reconcile_without_row_inserts() {
        let r = reconcile(None, 2);
        assert_eq!(r.previous_score, 0);
        assert_eq!(r.write, TopicWrite::Insert(2));
        assert_eq!(r.delta, 2);
    }

    #[test]
    fn reconcile_placeholder_records_first_attempt() {
        let r = reconcile(Some(None), 0);
        assert_eq!(r.write, TopicWrite::Update(0));
        assert_eq!(r.delta, 0);

        let r = reconcile(Some(None), 3);
        assert_eq!(r.delta, 3);
    }

    #[test]
    fn reconcile_only_improvements_count() {
        let better = reconcile(Some(Some(1)), 2);
        assert_eq!(better.previous_score, 1);
        assert_eq!(better.write, TopicWrite::Update(2));
        assert_eq!(better.delta, 1);

        let equal = reconcile(Some(Some(2)), 2);
        assert_eq!(equal.write, TopicWrite::Keep);
        assert_eq!(equal.delta, 0);

        let worse = reconcile(Some(Some(2)), 0);
        assert_eq!(worse.previous_score, 2);
        assert_eq!(worse.write, TopicWrite::Keep);
        assert_eq!(worse.delta, 0);
    }
}
