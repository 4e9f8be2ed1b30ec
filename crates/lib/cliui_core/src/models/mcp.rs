//! MCP server descriptor models.
//!
//! The external tool owns the server list; these types only describe what
//! is relayed to it and what is scraped back from its output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Transport kind of an MCP server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Stdio,
    Http,
    Sse,
}

impl TransportKind {
    /// Value passed to the tool's `--transport` flag.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Stdio => "stdio",
            TransportKind::Http => "http",
            TransportKind::Sse => "sse",
        }
    }

    /// Transport named by a request's `type` field. Anything other than
    /// `http` or `sse`, including no value, means stdio.
    pub fn from_request_type(value: Option<&str>) -> Self {
        match value {
            Some("http") => TransportKind::Http,
            Some("sse") => TransportKind::Sse,
            _ => TransportKind::Stdio,
        }
    }
}

/// Connection state reported by the tool's list output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Active,
    Inactive,
}

// =============================================================================
// Descriptors
// =============================================================================

/// Transport-specific connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTransport {
    Stdio {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    Http {
        url: String,
        headers: BTreeMap<String, String>,
    },
    Sse {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl ServerTransport {
    pub fn kind(&self) -> TransportKind {
        match self {
            ServerTransport::Stdio { .. } => TransportKind::Stdio,
            ServerTransport::Http { .. } => TransportKind::Http,
            ServerTransport::Sse { .. } => TransportKind::Sse,
        }
    }
}

/// A named MCP server to register with the external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServerDescriptor {
    pub name: String,
    pub transport: ServerTransport,
}

// =============================================================================
// Scraped results
// =============================================================================

/// One entry of the tool's server list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub status: ServerStatus,
}

/// Fields recovered from labelled lines of the tool's `get` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub raw_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

/// Parsed `get` output: an embedded JSON document, or scraped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerDetails {
    Json(serde_json::Value),
    Text(ScrapedServer),
}

/// Result of listing servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerListing {
    pub raw_output: String,
    pub servers: Vec<ServerSummary>,
}

/// Result of a mutating command (`add` / `remove`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub raw_output: String,
    pub message: String,
}

/// Result of fetching one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerLookup {
    pub raw_output: String,
    pub server: ServerDetails,
}
