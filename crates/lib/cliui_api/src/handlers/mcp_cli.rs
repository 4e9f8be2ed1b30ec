//! MCP server management through the external tool.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cliui_core::mcp::GatewayError;
use cliui_core::models::mcp::McpServerDescriptor;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::models::{AddServerRequest, CommandResponse, GetServerResponse, ListServersResponse};

/// `GET /mcp/cli/list`
pub async fn list_handler(State(state): State<AppState>) -> AppResult<Json<ListServersResponse>> {
    let listing = state
        .gateway
        .list_servers()
        .await
        .map_err(|e| AppError::from_gateway(e, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(ListServersResponse {
        success: true,
        output: listing.raw_output,
        servers: listing.servers,
    }))
}

/// `POST /mcp/cli/add`
pub async fn add_handler(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AddServerRequest>,
) -> AppResult<Json<CommandResponse>> {
    let descriptor = McpServerDescriptor::from(body);
    let outcome = state
        .gateway
        .add_server(&descriptor)
        .await
        .map_err(|e| AppError::from_gateway(e, StatusCode::BAD_REQUEST))?;
    Ok(Json(CommandResponse {
        success: true,
        output: outcome.raw_output,
        message: outcome.message,
    }))
}

/// `DELETE /mcp/cli/remove/{name}`
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<CommandResponse>> {
    let outcome = state
        .gateway
        .remove_server(&name)
        .await
        .map_err(|e| AppError::from_gateway(e, StatusCode::BAD_REQUEST))?;
    Ok(Json(CommandResponse {
        success: true,
        output: outcome.raw_output,
        message: outcome.message,
    }))
}

/// `GET /mcp/cli/get/{name}`: a failed lookup, including a name the tool
/// could never hold, is reported as not found.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<GetServerResponse>> {
    let lookup = state
        .gateway
        .get_server(&name)
        .await
        .map_err(|e| match e {
            GatewayError::Validation(msg) => AppError::NotFound(msg),
            other => AppError::from_gateway(other, StatusCode::NOT_FOUND),
        })?;
    Ok(Json(GetServerResponse {
        success: true,
        output: lookup.raw_output,
        server: lookup.server,
    }))
}
