//! Health endpoint: bootstrap check of the core lib and database.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /health`: reports the version and whether SQLite answers.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let db_connected = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("database check failed: {e}");
            false
        }
    };

    Ok(Json(HealthResponse {
        version: cliui_core::version().to_string(),
        db_connected,
    }))
}
