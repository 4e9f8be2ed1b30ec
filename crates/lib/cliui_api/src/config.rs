//! API server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default overall request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3001").
    pub bind_addr: String,
    /// Path of the SQLite credential database.
    pub database_path: PathBuf,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_lifetime_secs: i64,
    /// bcrypt cost factor for new password hashes.
    pub bcrypt_cost: u32,
    /// External tool executable.
    pub tool_bin: String,
    /// Arguments placed before the tool's `mcp` subcommand.
    pub tool_args: Vec<String>,
    /// Root of the tool's per-project transcript directories.
    pub sessions_dir: PathBuf,
    /// Overall timeout applied to every request.
    pub request_timeout: Duration,
}

/// Split a whitespace-separated argument list.
pub fn split_args(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
