//! Bearer token gate for protected routes.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use cliui_core::auth::AuthError;
use cliui_core::auth::jwt::verify_token;
use cliui_core::auth::queries::get_user_by_id;
use cliui_core::models::auth::{SafeUser, TokenClaims};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Verified identity stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: TokenClaims,
    pub user: SafeUser,
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// confirms the user is still active, and injects `AuthenticatedUser` into
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = verify_token(token, state.config.jwt_secret.as_bytes())?;

    let Some(user) = get_user_by_id(&state.pool, claims.user_id).await? else {
        debug!(user_id = claims.user_id, "token for unknown or inactive user");
        return Err(AuthError::InvalidToken.into());
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { claims, user });

    Ok(next.run(request).await)
}
