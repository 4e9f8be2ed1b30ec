//! Request handlers.

pub mod auth;
pub mod health;
pub mod mcp_cli;
pub mod sessions;
