//! Authentication service: status, register, login and logout flows
//! delegating to `cliui_core::auth`.

use chrono::Duration;
use cliui_core::auth::password::{hash_password, verify_password};
use cliui_core::auth::{AuthError, jwt, queries, validate_registration};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::AppResult;
use crate::models::{AuthStatusResponse, AuthUser, LogoutResponse, TokenResponse};

const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Unwrap optional credentials, rejecting absent or empty values.
fn require_credentials<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), AuthError> {
    match (username, password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
        _ => Err(AuthError::ValidationError(MISSING_CREDENTIALS.into())),
    }
}

fn issue_token(config: &ApiConfig, user_id: i64, username: &str) -> AppResult<TokenResponse> {
    let token = jwt::generate_token(
        user_id,
        username,
        config.jwt_secret.as_bytes(),
        Duration::seconds(config.token_lifetime_secs),
    )?;
    Ok(TokenResponse {
        success: true,
        user: AuthUser {
            id: user_id,
            username: username.to_string(),
        },
        token,
    })
}

/// Whether first-time setup is still pending.
pub async fn status(pool: &SqlitePool) -> AppResult<AuthStatusResponse> {
    let has_user = queries::has_any_user(pool).await?;
    Ok(AuthStatusResponse {
        needs_setup: !has_user,
        is_authenticated: false,
    })
}

/// Create the single account and log it in.
pub async fn register(
    pool: &SqlitePool,
    config: &ApiConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<TokenResponse> {
    let (username, password) = require_credentials(username, password)?;
    validate_registration(username, password)?;

    if queries::has_any_user(pool).await? {
        return Err(AuthError::SetupAlreadyComplete.into());
    }

    let hash = hash_password(password, config.bcrypt_cost)?;
    let user = queries::create_user(pool, username, &hash).await?;
    let resp = issue_token(config, user.id, &user.username)?;
    queries::touch_last_login(pool, user.id).await;

    info!(user_id = user.id, "account registered");
    Ok(resp)
}

/// Authenticate with username and password.
///
/// Unknown users and wrong passwords fail with the same error.
pub async fn login(
    pool: &SqlitePool,
    config: &ApiConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<TokenResponse> {
    let (username, password) = require_credentials(username, password)?;

    let Some(user) = queries::get_user_by_username(pool, username).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };
    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let resp = issue_token(config, user.id, &user.username)?;
    queries::touch_last_login(pool, user.id).await;

    info!(user_id = user.id, "login succeeded");
    Ok(resp)
}

/// Tokens are stateless; the client discards its copy.
pub fn logout() -> LogoutResponse {
    LogoutResponse {
        success: true,
        message: "Logged out successfully".into(),
    }
}
