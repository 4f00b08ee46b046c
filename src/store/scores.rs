// src/store/scores.rs

use sqlx::SqliteExecutor;

use super::StoreResult;
use crate::models::topic_score::UserTopicScore;

pub async fn find<'e, E>(executor: E, user_id: i64, topic: &str) -> StoreResult<Option<UserTopicScore>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserTopicScore>(
        "SELECT id, user_id, topic, score FROM user_topic_scores WHERE user_id = ? AND topic = ?",
    )
    .bind(user_id)
    .bind(topic)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

pub async fn for_user<'e, E>(executor: E, user_id: i64) -> StoreResult<Vec<UserTopicScore>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, UserTopicScore>(
        "SELECT id, user_id, topic, score FROM user_topic_scores WHERE user_id = ? ORDER BY topic",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Inserts a (user, topic) row. `None` creates an unattempted placeholder.
pub async fn insert<'e, E>(
    executor: E,
    user_id: i64,
    topic: &str,
    score: Option<i64>,
) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT INTO user_topic_scores (user_id, topic, score) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(topic)
        .bind(score)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn update<'e, E>(executor: E, user_id: i64, topic: &str, score: i64) -> StoreResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE user_topic_scores SET score = ? WHERE user_id = ? AND topic = ?")
        .bind(score)
        .bind(user_id)
        .bind(topic)
        .execute(executor)
        .await?;
    Ok(())
}

/// Removes every score row of a user. Returns the number of rows deleted.
pub async fn delete_for_user<'e, E>(executor: E, user_id: i64) -> StoreResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM user_topic_scores WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Sum of the user's topic bests, unattempted topics counting as 0.
pub async fn sum_for_user<'e, E>(executor: E, user_id: i64) -> StoreResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let sum = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(score), 0) FROM user_topic_scores WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(executor)
    .await?;
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, test_pool, users};

    #[tokio::test]
    async fn one_row_per_user_and_topic() {
        let pool = test_pool().await;
        let user = users::insert(&pool, "alice", "hash").await.unwrap();

        insert(&pool, user.id, "joins", None).await.unwrap();
        let err = insert(&pool, user.id, "joins", Some(2)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        let row = find(&pool, user.id, "joins").await.unwrap().unwrap();
        assert_eq!(row.score, None);
    }

    #[tokio::test]
    async fn update_and_sum() {
        let pool = test_pool().await;
        let user = users::insert(&pool, "alice", "hash").await.unwrap();

        insert(&pool, user.id, "joins", None).await.unwrap();
        insert(&pool, user.id, "crud", Some(1)).await.unwrap();
        assert_eq!(sum_for_user(&pool, user.id).await.unwrap(), 1);

        update(&pool, user.id, "joins", 2).await.unwrap();
        assert_eq!(sum_for_user(&pool, user.id).await.unwrap(), 3);

        let rows = for_user(&pool, user.id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].topic, "crud");
    }

    #[tokio::test]
    async fn deleting_user_cascades() {
        let pool = test_pool().await;
        let user = users::insert(&pool, "alice", "hash").await.unwrap();
        insert(&pool, user.id, "joins", Some(1)).await.unwrap();

        users::delete(&pool, user.id).await.unwrap();
        assert!(for_user(&pool, user.id).await.unwrap().is_empty());
        assert_eq!(delete_for_user(&pool, user.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn score_requires_existing_user() {
        let pool = test_pool().await;
        let err = insert(&pool, 42, "joins", Some(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
