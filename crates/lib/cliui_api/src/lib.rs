//! # cliui_api
//!
//! HTTP API library for cliui.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use cliui_core::mcp::McpCliGateway;
use cliui_core::sessions::SessionRegistry;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, mcp_cli, sessions};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool holding the credential store.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
    /// Front end to the external tool's `mcp` subcommands.
    pub gateway: Arc<McpCliGateway>,
    /// In-memory chat sessions.
    pub sessions: Arc<SessionRegistry>,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::GET_AUTH_STATUS, get(auth::auth_status_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_AUTH_USER, get(auth::current_user_handler))
        .route(routes::POST_AUTH_LOGOUT, post(auth::logout_handler))
        .route(routes::GET_MCP_CLI_LIST, get(mcp_cli::list_handler))
        .route(routes::POST_MCP_CLI_ADD, post(mcp_cli::add_handler))
        .route(
            routes::DELETE_MCP_CLI_REMOVE_NAME,
            delete(mcp_cli::remove_handler),
        )
        .route(routes::GET_MCP_CLI_GET_NAME, get(mcp_cli::get_handler))
        .route(routes::GET_SESSIONS, get(sessions::list_sessions_handler))
        .route(
            routes::SESSIONS_ID_MESSAGES,
            get(sessions::transcript_handler).post(sessions::append_message_handler),
        )
        .route(
            routes::GET_SESSIONS_ID_CONTEXT,
            get(sessions::context_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
