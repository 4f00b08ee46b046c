// src/utils/hash.rs

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes a raw password into a salted Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Checks a raw password against a stored hash.
///
/// A stored value that is not a valid PHC string is an internal error,
/// not a failed login.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();
        assert_ne!(first, second);
        assert!(!first.contains("hunter22"));

        assert!(verify_password("hunter22", &first).unwrap());
        assert!(!verify_password("hunter23", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("hunter22", "plaintext").is_err());
    }
}
