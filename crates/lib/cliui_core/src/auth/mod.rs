//! Authentication logic.
//!
//! Provides password hashing, JWT management, and the credential store
//! queries used by `cliui_api`.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User already exists. This is a single-user system.")]
    SetupAlreadyComplete,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Check registration input against the length rules.
pub fn validate_registration(username: &str, password: &str) -> Result<(), AuthError> {
    if username.chars().count() < MIN_USERNAME_LEN || password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::ValidationError(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters, password at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_accepts_minimum_lengths() {
        assert!(validate_registration("bob", "secret").is_ok());
    }

    #[test]
    fn registration_rejects_short_username() {
        let err = validate_registration("bo", "long-enough").unwrap_err();
        assert!(matches!(err, AuthError::ValidationError(_)));
    }

    #[test]
    fn registration_rejects_short_password() {
        let err = validate_registration("alice", "12345").unwrap_err();
        assert!(matches!(err, AuthError::ValidationError(_)));
    }

    #[test]
    fn registration_counts_characters_not_bytes() {
        // Three characters, six bytes.
        assert!(validate_registration("äöü", "pässwö").is_ok());
    }
}
