//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cliui_core::auth::AuthError;
use cliui_core::mcp::GatewayError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// External tool failure, reported with the route-specific status.
    #[error("External tool command failed")]
    Tool { status: StatusCode, details: String },

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Map a gateway error, reporting tool failures with `tool_status`.
    pub fn from_gateway(e: GatewayError, tool_status: StatusCode) -> Self {
        match e {
            GatewayError::Validation(msg) => AppError::Validation(msg),
            GatewayError::ToolFailed { details } => AppError::Tool {
                status: tool_status,
                details,
            },
            GatewayError::Spawn(e) => AppError::Internal(format!("spawn external tool: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            error!(%detail, "internal error");
        }
        let (status, error, message, details) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m, None),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m, None),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m, None),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m, None),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m, None),
            AppError::Tool { status, details } => (
                status,
                "tool_execution_error",
                "External tool command failed".to_string(),
                Some(details),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            details,
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired => AppError::Unauthorized(e.to_string()),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::SetupAlreadyComplete => AppError::Forbidden(e.to_string()),
            AuthError::DuplicateUsername => AppError::Conflict(e.to_string()),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
