//! Chat session handlers backed by the in-memory registry.

use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::models::{
    AppendMessageRequest, ContextResponse, SessionListQuery, SessionListResponse,
    SessionResponse, TranscriptResponse,
};

/// `GET /sessions?projectPath=…`
pub async fn list_sessions_handler(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Json<SessionListResponse> {
    Json(SessionListResponse {
        sessions: state.sessions.list_project_sessions(&query.project_path),
    })
}

/// `GET /sessions/{id}/messages`
pub async fn transcript_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        messages: state.sessions.render_transcript(&id),
    })
}

/// `POST /sessions/{id}/messages`: creates the session when unknown.
pub async fn append_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<AppendMessageRequest>,
) -> AppResult<Json<SessionResponse>> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("Session id is required".into()));
    }
    let session = state.sessions.append_message(&id, body.role, &body.content);
    debug!(session_id = %id, messages = session.messages.len(), "message appended");
    Ok(Json(SessionResponse { session }))
}

/// `GET /sessions/{id}/context`
pub async fn context_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ContextResponse> {
    Json(ContextResponse {
        context: state.sessions.build_context_prefix(&id),
    })
}
