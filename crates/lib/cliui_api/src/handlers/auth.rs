//! Authentication request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AuthStatusResponse, CredentialsRequest, CurrentUserResponse, LogoutResponse, TokenResponse,
};
use crate::services::auth;

/// `GET /auth/status`: whether the single account still needs creating.
pub async fn auth_status_handler(
    State(state): State<AppState>,
) -> AppResult<Json<AuthStatusResponse>> {
    let resp = auth::status(&state.pool).await?;
    Ok(Json(resp))
}

/// `POST /auth/register`: create the one account and return a token.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::register(
        &state.pool,
        &state.config,
        body.username.as_deref(),
        body.password.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /auth/login`: authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &state.config,
        body.username.as_deref(),
        body.password.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /auth/user`: the user attached by the token gate.
pub async fn current_user_handler(
    Extension(authed): Extension<AuthenticatedUser>,
) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user: authed.user })
}

/// `POST /auth/logout`: nothing to revoke server-side.
pub async fn logout_handler() -> Json<LogoutResponse> {
    Json(auth::logout())
}
