//! Request and response bodies of the HTTP API.

use std::collections::BTreeMap;

use cliui_core::models::auth::SafeUser;
use cliui_core::models::mcp::{
    McpServerDescriptor, ServerDetails, ServerSummary, ServerTransport, TransportKind,
};
use cliui_core::models::session::{Role, Session, SessionSummary, TranscriptEntry};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    pub db_connected: bool,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Credentials for register and login. Missing fields are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub needs_setup: bool,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub user: AuthUser,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: SafeUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// ---------------------------------------------------------------------------
// MCP via the external tool
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddServerRequest {
    pub name: String,
    /// `stdio`, `http` or `sse`; unrecognised values mean stdio.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl From<AddServerRequest> for McpServerDescriptor {
    fn from(req: AddServerRequest) -> Self {
        let transport = match TransportKind::from_request_type(req.kind.as_deref()) {
            TransportKind::Stdio => ServerTransport::Stdio {
                command: req.command.unwrap_or_default(),
                args: req.args,
                env: req.env,
            },
            TransportKind::Http => ServerTransport::Http {
                url: req.url.unwrap_or_default(),
                headers: req.headers,
            },
            TransportKind::Sse => ServerTransport::Sse {
                url: req.url.unwrap_or_default(),
                headers: req.headers,
            },
        };
        McpServerDescriptor {
            name: req.name,
            transport,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListServersResponse {
    pub success: bool,
    pub output: String,
    pub servers: Vec<ServerSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub output: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetServerResponse {
    pub success: bool,
    pub output: String,
    pub server: ServerDetails,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListQuery {
    #[serde(default)]
    pub project_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub messages: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Session,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    pub context: String,
}
