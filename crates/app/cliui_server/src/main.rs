//! cliui HTTP server binary.
//!
//! Serves the auth, MCP management and chat session API on one port.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cliui_api::config::{ApiConfig, DEFAULT_REQUEST_TIMEOUT_SECS, split_args};
use cliui_core::auth::jwt::{DEFAULT_TOKEN_LIFETIME_SECS, resolve_jwt_secret};
use cliui_core::auth::password::DEFAULT_BCRYPT_COST;
use cliui_core::mcp::{McpCliGateway, ProcessRunner};
use cliui_core::sessions::SessionRegistry;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "cliui_server", about = "cliui API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3001")]
    bind_addr: String,

    /// SQLite credential database (default: `<data dir>/cliui/auth.db`).
    #[arg(long, env = "DATABASE_PATH")]
    database_path: Option<PathBuf>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Token signing secret. Falls back to `AUTH_SECRET`, then to a
    /// generated secret persisted in the data dir.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Lifetime of issued tokens, in seconds.
    #[arg(long, env = "JWT_EXPIRY_SECS", default_value_t = DEFAULT_TOKEN_LIFETIME_SECS)]
    jwt_expiry_secs: i64,

    /// bcrypt cost factor.
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    bcrypt_cost: u32,

    /// External tool executable.
    #[arg(long, env = "CLI_TOOL_BIN", default_value = "gemini")]
    tool_bin: String,

    /// Extra arguments placed before `mcp`, whitespace separated.
    #[arg(long, env = "CLI_TOOL_ARGS", default_value = "")]
    tool_args: String,

    /// Root of the tool's per-project transcript directories
    /// (default: `~/.gemini/tmp`).
    #[arg(long, env = "CLI_SESSIONS_DIR")]
    sessions_dir: Option<PathBuf>,

    /// Overall per-request timeout, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ApiConfig {
        ApiConfig {
            bind_addr: self.bind_addr,
            database_path: self
                .database_path
                .unwrap_or_else(cliui_core::db::default_db_path),
            jwt_secret: self
                .jwt_secret
                .filter(|s| !s.is_empty())
                .unwrap_or_else(resolve_jwt_secret),
            token_lifetime_secs: self.jwt_expiry_secs,
            bcrypt_cost: self.bcrypt_cost,
            tool_bin: self.tool_bin,
            tool_args: split_args(&self.tool_args),
            sessions_dir: self
                .sessions_dir
                .unwrap_or_else(SessionRegistry::default_transcripts_dir),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cliui_api=debug,cliui_core=debug".into()),
        )
        .init();

    let args = Args::parse();
    let max_connections = args.max_connections;
    let config = args.into_config();

    info!(
        db = %config.database_path.display(),
        tool = %config.tool_bin,
        "starting cliui_server"
    );

    let pool = cliui_core::db::connect(&config.database_path, max_connections).await?;

    let runner = ProcessRunner::new(&config.tool_bin).with_leading_args(config.tool_args.clone());
    let gateway = Arc::new(McpCliGateway::new(Arc::new(runner)));

    let sessions = Arc::new(SessionRegistry::new(config.sessions_dir.clone()));
    sessions.load_from_disk().await;

    let state = cliui_api::AppState {
        pool,
        config: config.clone(),
        gateway,
        sessions,
    };

    let app = cliui_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
