// src/store/users.rs

use sqlx::SqliteExecutor;

use super::StoreResult;
use crate::models::user::User;

const USER_COLUMNS: &str = "id, username, password, score, created_at";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> StoreResult<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

pub async fn find_by_username<'e, E>(executor: E, username: &str) -> StoreResult<Option<User>>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(executor)
    .await?;
    Ok(user)
}

/// Inserts a new user with an aggregate score of 0.
///
/// A taken username surfaces as [`StoreError::UniqueViolation`](super::StoreError::UniqueViolation).
pub async fn insert<'e, E>(executor: E, username: &str, password_hash: &str) -> StoreResult<User>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password, score) VALUES (?, ?, 0) RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(password_hash)
    .fetch_one(executor)
    .await?;
    Ok(user)
}

/// Adds `delta` to the aggregate score. Returns false if the user is gone.
pub async fn add_score<'e, E>(executor: E, id: i64, delta: i64) -> StoreResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE users SET score = score + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes the user row. Returns false if it did not exist.
pub async fn delete<'e, E>(executor: E, id: i64) -> StoreResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreError, test_pool};

    #[tokio::test]
    async fn insert_and_lookup() {
        let pool = test_pool().await;

        let user = insert(&pool, "alice", "hash").await.unwrap();
        assert_eq!(user.score, 0);

        let by_name = find_by_username(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        let by_id = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(find_by_username(&pool, "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_unique_violation() {
        let pool = test_pool().await;

        insert(&pool, "alice", "hash").await.unwrap();
        let err = insert(&pool, "alice", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn add_score_and_delete() {
        let pool = test_pool().await;
        let user = insert(&pool, "alice", "hash").await.unwrap();

        assert!(add_score(&pool, user.id, 3).await.unwrap());
        assert_eq!(find_by_id(&pool, user.id).await.unwrap().unwrap().score, 3);

        assert!(delete(&pool, user.id).await.unwrap());
        assert!(!delete(&pool, user.id).await.unwrap());
        assert!(!add_score(&pool, user.id, 1).await.unwrap());
    }
}
