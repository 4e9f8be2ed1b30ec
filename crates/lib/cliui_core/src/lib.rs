//! # cliui_core
//!
//! Core domain logic for cliui: the credential store, token primitives,
//! the external tool gateway and the chat session registry.

pub mod auth;
pub mod db;
pub mod mcp;
pub mod migrate;
pub mod models;
pub mod sessions;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
