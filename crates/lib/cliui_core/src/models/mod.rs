//! Domain models shared between `cliui_core` and `cliui_api`.

pub mod auth;
pub mod mcp;
pub mod session;
