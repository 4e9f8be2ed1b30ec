//! External tool gateway for MCP server configuration.
//!
//! The external tool owns the list of MCP servers; this module translates
//! list/add/remove/get into invocations of its `mcp` subcommand and scrapes
//! the human-readable output back into structured values.

pub mod args;
pub mod gateway;
pub mod parser;
pub mod runner;

use thiserror::Error;

pub use gateway::McpCliGateway;
pub use parser::{OutputParser, TextOutputParser};
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};

/// Gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The tool ran but exited unsuccessfully. Carries its captured output.
    #[error("External tool command failed")]
    ToolFailed { details: String },

    /// The tool could not be started at all.
    #[error("External tool could not be started: {0}")]
    Spawn(#[from] std::io::Error),
}
