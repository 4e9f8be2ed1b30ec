//! Scraping of the external tool's human-readable output.
//!
//! The tool's text output is not a stable interface and may change between
//! tool versions. Parsing here is best-effort: unrecognised lines are
//! skipped, and `get` output always yields something, even if only the raw
//! text. Callers depend on the `OutputParser` trait so a structured
//! integration can replace `TextOutputParser` without touching them.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::mcp::{
    ScrapedServer, ServerDetails, ServerStatus, ServerSummary, TransportKind,
};

/// SGR color/style escape sequences, e.g. `\x1b[32m`.
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI escape regex is valid"));

/// Glyph the tool prints in front of a connected server.
const ACTIVE_GLYPH: char = '✓';

/// Glyph the tool prints in front of a disconnected server.
const INACTIVE_GLYPH: char = '✗';

/// Lines that are banners or notices rather than server entries.
const NOISE_MARKERS: &[&str] = &["Configured MCP servers", "Loaded cached credentials"];

/// Turns tool output into structured values.
pub trait OutputParser: Send + Sync {
    /// Parse the output of `mcp list`.
    fn parse_list(&self, output: &str) -> Vec<ServerSummary>;

    /// Parse the output of `mcp get <name>`.
    fn parse_get(&self, output: &str) -> ServerDetails;
}

/// Parser for the tool's default human-readable format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutputParser;

impl OutputParser for TextOutputParser {
    fn parse_list(&self, output: &str) -> Vec<ServerSummary> {
        let clean = strip_ansi(output);
        clean.lines().filter_map(parse_list_line).collect()
    }

    fn parse_get(&self, output: &str) -> ServerDetails {
        let mut parse_error = None;

        if let Some(block) = embedded_json(output) {
            match serde_json::from_str::<serde_json::Value>(block) {
                Ok(value) => return ServerDetails::Json(value),
                Err(e) => parse_error = Some(e.to_string()),
            }
        }

        let mut server = ScrapedServer {
            raw_output: output.to_string(),
            parse_error,
            ..ScrapedServer::default()
        };
        for line in strip_ansi(output).lines() {
            if line.contains("Name:") {
                server.name = value_after_colon(line);
            } else if line.contains("Type:") {
                server.kind = value_after_colon(line);
            } else if line.contains("Command:") {
                server.command = value_after_colon(line);
            } else if line.contains("URL:") {
                server.url = value_after_colon(line);
            }
        }
        ServerDetails::Text(server)
    }
}

/// Remove terminal color escapes.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

fn parse_list_line(line: &str) -> Option<ServerSummary> {
    if line.trim().is_empty() || NOISE_MARKERS.iter().any(|m| line.contains(m)) {
        return None;
    }

    let (head, rest) = line.split_once(':')?;
    let name = head
        .trim()
        .trim_start_matches([ACTIVE_GLYPH, INACTIVE_GLYPH])
        .trim();
    if name.is_empty() {
        return None;
    }

    let status = if line.contains(ACTIVE_GLYPH) {
        ServerStatus::Active
    } else {
        ServerStatus::Inactive
    };

    Some(ServerSummary {
        name: name.to_string(),
        kind: infer_transport(rest.trim()),
        status,
    })
}

fn infer_transport(meta: &str) -> TransportKind {
    let lower = meta.to_ascii_lowercase();
    if lower.contains("(sse)") {
        TransportKind::Sse
    } else if lower.contains("(http)") || lower.starts_with("http") {
        TransportKind::Http
    } else {
        TransportKind::Stdio
    }
}

/// The span from the first `{` to the last `}`, if any.
fn embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn value_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
