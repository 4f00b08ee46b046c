// src/store/questions.rs

use sqlx::SqliteExecutor;

use super::StoreResult;
use crate::models::question::{QuizQuestion, SeedQuestion, TopicSummary};

/// Distinct topic labels present in the question table, sorted.
pub async fn distinct_topics<'e, E>(executor: E) -> StoreResult<Vec<String>>
where
    E: SqliteExecutor<'e>,
{
    let topics = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT topic FROM quiz_questions ORDER BY topic",
    )
    .fetch_all(executor)
    .await?;
    Ok(topics)
}

pub async fn topic_summaries<'e, E>(executor: E) -> StoreResult<Vec<TopicSummary>>
where
    E: SqliteExecutor<'e>,
{
    let summaries = sqlx::query_as::<_, TopicSummary>(
        r#"
        SELECT topic, COUNT(*) AS questions
        FROM quiz_questions
        GROUP BY topic
        ORDER BY topic
        "#,
    )
    .fetch_all(executor)
    .await?;
    Ok(summaries)
}

/// All questions of a topic in id order. Empty for unknown topics.
pub async fn for_topic<'e, E>(executor: E, topic: &str) -> StoreResult<Vec<QuizQuestion>>
where
    E: SqliteExecutor<'e>,
{
    let questions = sqlx::query_as::<_, QuizQuestion>(
        r#"
        SELECT id, topic, question, option1, option2, option3, option4, correct_option
        FROM quiz_questions
        WHERE topic = ?
        ORDER BY id
        "#,
    )
    .bind(topic)
    .fetch_all(executor)
    .await?;
    Ok(questions)
}

pub async fn count<'e, E>(executor: E) -> StoreResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quiz_questions")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

pub async fn insert<'e, E>(executor: E, question: &SeedQuestion) -> StoreResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let [option1, option2, option3, option4] = &question.options;
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quiz_questions (topic, question, option1, option2, option3, option4, correct_option)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&question.topic)
    .bind(&question.question)
    .bind(option1)
    .bind(option2)
    .bind(option3)
    .bind(option4)
    .bind(question.correct_option)
    .fetch_one(executor)
    .await?;
    Ok(id)
}
