// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid username pattern"));

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Sum of the user's best score in every topic.
    pub score: i64,

    pub created_at: chrono::NaiveDateTime,
}

/// Form payload for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username length must be between 3 and 50 characters."
        ),
        custom(function = validate_username)
    )]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// Form payload for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Dashboard data for the logged-in user.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub score: i64,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !USERNAME_PATTERN.is_match(username) {
        return Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits, '_', '.' and '-'.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_plain_usernames() {
        assert!(request("alice_01", "secret").validate().is_ok());
        assert!(request("bob.smith-2", "secret").validate().is_ok());
    }

    #[test]
    fn rejects_short_or_odd_usernames() {
        assert!(request("yo", "secret").validate().is_err());
        assert!(request("has space", "secret").validate().is_err());
        assert!(request("", "secret").validate().is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(request("alice", "abc").validate().is_err());
    }
}
