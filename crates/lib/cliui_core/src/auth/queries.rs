//! Credential store queries.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::AuthError;
use crate::models::auth::{SafeUser, UserRecord};

/// Whether at least one user record exists.
pub async fn has_any_user(pool: &SqlitePool) -> Result<bool, AuthError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users)")
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Insert a new user.
///
/// Any uniqueness violation (the username, or the single-active-user index)
/// is reported as `DuplicateUsername`.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<UserRecord, AuthError> {
    let row = sqlx::query_as::<_, UserRecord>(
        "INSERT INTO users (username, password_hash, is_active, created_at) \
         VALUES (?, ?, 1, ?) \
         RETURNING id, username, password_hash, is_active, created_at, last_login",
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::DuplicateUsername,
        other => AuthError::DbError(other),
    })?;
    debug!(user_id = row.id, "user created");
    Ok(row)
}

/// Fetch an active user by username.
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, password_hash, is_active, created_at, last_login \
         FROM users WHERE username = ? AND is_active = 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch an active user by id, without the password hash.
pub async fn get_user_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<SafeUser>, AuthError> {
    let row = sqlx::query_as::<_, SafeUser>(
        "SELECT id, username, created_at, last_login \
         FROM users WHERE id = ? AND is_active = 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Record a successful login. Failures are logged, never returned.
pub async fn touch_last_login(pool: &SqlitePool, user_id: i64) {
    let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await;
    if let Err(e) = result {
        warn!(user_id, error = %e, "failed to update last login");
    }
}
