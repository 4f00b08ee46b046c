// src/store/mod.rs

//! Persistent store: SQLite access for users, quiz questions and per-topic scores.
//!
//! Every query function takes a generic [`SqliteExecutor`] so callers can run it
//! against the pool or inside a transaction (`&mut *tx`).

pub mod questions;
pub mod scores;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    Sqlite, SqlitePool, Transaction,
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Opens a connection pool, creating the database file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

/// Begins a transaction that holds the database write lock from the start.
/// Concurrent writers wait on the busy timeout rather than failing mid-transaction.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // A single connection that never expires, otherwise the in-memory database vanishes.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Failed to migrate database");
    pool
}
