//! Startup scan of the external tool's transcript files.
//!
//! Layout: `<base>/<project>/chats/<file>.json`, one session per file.
//! Missing or unreadable directories and malformed files are skipped.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::SessionRegistry;
use crate::models::session::{Role, Session, SessionMessage};

/// Directory inside each project holding the transcripts.
const CHATS_DIR: &str = "chats";

/// Message type tag the tool uses for its own replies.
const ASSISTANT_TAG: &str = "gemini";

/// Message type tag for user prompts.
const USER_TAG: &str = "user";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptFile {
    session_id: String,
    start_time: Option<String>,
    last_updated: Option<String>,
    #[serde(default)]
    messages: Vec<TranscriptRecord>,
}

#[derive(Debug, Deserialize)]
struct TranscriptRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: serde_json::Value,
    timestamp: Option<String>,
}

impl SessionRegistry {
    /// Populate the registry from the transcript directory.
    ///
    /// Returns the number of sessions loaded. A missing base directory is
    /// not an error.
    pub async fn load_from_disk(&self) -> usize {
        let base = self.transcripts_dir().to_path_buf();
        let mut projects = match tokio::fs::read_dir(&base).await {
            Ok(dir) => dir,
            Err(e) => {
                debug!(error = %e, "no transcript directory, starting with no sessions");
                return 0;
            }
        };

        let mut loaded = 0;
        while let Ok(Some(project)) = projects.next_entry().await {
            let project_name = project.file_name().to_string_lossy().into_owned();
            let chats = project.path().join(CHATS_DIR);
            loaded += self.load_project(&project_name, &chats).await;
        }

        info!(sessions = loaded, "loaded chat sessions from disk");
        loaded
    }

    async fn load_project(&self, project_name: &str, chats: &Path) -> usize {
        let Ok(mut files) = tokio::fs::read_dir(chats).await else {
            return 0;
        };

        let mut loaded = 0;
        while let Ok(Some(file)) = files.next_entry().await {
            let path = file.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let raw = match tokio::fs::read_to_string(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    debug!(project = project_name, error = %e, "unreadable transcript skipped");
                    continue;
                }
            };
            match parse_transcript(project_name, &raw) {
                Ok(session) => {
                    self.insert(session);
                    loaded += 1;
                }
                Err(e) => {
                    debug!(project = project_name, error = %e, "malformed transcript skipped");
                }
            }
        }
        loaded
    }
}

/// Build a session from one transcript file's contents.
fn parse_transcript(project_name: &str, raw: &str) -> Result<Session, serde_json::Error> {
    let file: TranscriptFile = serde_json::from_str(raw)?;

    let created_at = file
        .start_time
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);
    let last_activity = file
        .last_updated
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(created_at);

    let messages = file
        .messages
        .into_iter()
        .filter_map(|record| {
            let role = match record.kind.as_str() {
                USER_TAG => Role::User,
                ASSISTANT_TAG => Role::Assistant,
                _ => return None,
            };
            Some(SessionMessage {
                role,
                content: flatten_content(&record.content),
                timestamp: record
                    .timestamp
                    .as_deref()
                    .and_then(parse_timestamp)
                    .unwrap_or(last_activity),
            })
        })
        .collect();

    Ok(Session {
        id: file.session_id,
        project_path: project_name.to_string(),
        project_name: project_name.to_string(),
        messages,
        created_at,
        last_activity,
    })
}

/// Plain strings pass through; block arrays become their `text` fields
/// joined by newlines.
fn flatten_content(content: &serde_json::Value) -> String {
    match content {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(blocks) => blocks
            .iter()
            .map(|block| block.get("text").and_then(|t| t.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
