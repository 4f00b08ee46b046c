// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Default lifetime of a login session, in seconds (one day).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl: u64,
    pub bind_addr: String,
    /// Optional JSON question bank loaded into an empty database at startup.
    pub seed_file: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quiz.db?mode=rwc".to_string());

        let session_secret = env::var("SESSION_SECRET").expect("SESSION_SECRET must be set");

        let session_ttl = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let seed_file = env::var("SEED_FILE").ok().filter(|v| !v.is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            session_secret,
            session_ttl,
            bind_addr,
            seed_file,
            rust_log,
        }
    }
}
