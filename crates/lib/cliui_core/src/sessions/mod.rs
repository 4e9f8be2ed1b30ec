//! In-memory chat session registry.
//!
//! Sessions are keyed by id and rebuilt from the external tool's transcript
//! files at startup (see [`loader`]). Nothing is written back to disk.

pub mod loader;

use std::path::{Path, PathBuf};

use chrono::Utc;
use dashmap::DashMap;

use crate::models::session::{
    Role, Session, SessionMessage, SessionSummary, TranscriptEntry, TranscriptMessage,
};

/// Summary shown for sessions without a user message.
pub const EMPTY_SESSION_SUMMARY: &str = "New Session";

/// Maximum summary length in characters before truncation.
const SUMMARY_MAX_CHARS: usize = 50;

/// Session store shared by all request handlers.
///
/// Each entry is guarded by its `DashMap` shard lock, so appends to the
/// same session are serialized.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
    transcripts_dir: PathBuf,
}

impl SessionRegistry {
    /// Create an empty registry that loads transcripts from `transcripts_dir`.
    pub fn new(transcripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions: DashMap::new(),
            transcripts_dir: transcripts_dir.into(),
        }
    }

    /// Default transcript location: `~/.gemini/tmp`.
    pub fn default_transcripts_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemini")
            .join("tmp")
    }

    pub fn transcripts_dir(&self) -> &Path {
        &self.transcripts_dir
    }

    /// Start an empty session, replacing any session with the same id.
    pub fn create_session(&self, id: &str, project_path: &str) -> Session {
        let session = new_session(id, project_path);
        self.sessions.insert(id.to_string(), session.clone());
        session
    }

    /// Append a message, creating the session (with no project) if needed.
    pub fn append_message(&self, id: &str, role: Role, content: &str) -> Session {
        let now = Utc::now();
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| new_session(id, ""));
        entry.messages.push(SessionMessage {
            role,
            content: content.to_string(),
            timestamp: now,
        });
        entry.last_activity = now;
        entry.value().clone()
    }

    pub fn get_session(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    /// Insert a fully built session, replacing any with the same id.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions of the project named by the last segment of `project_path`,
    /// most recently active first.
    pub fn list_project_sessions(&self, project_path: &str) -> Vec<SessionSummary> {
        let project_name = project_name_of(project_path);
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .iter()
            .filter(|s| s.project_name == project_name)
            .map(|s| SessionSummary {
                id: s.id.clone(),
                summary: summarize(&s),
                message_count: s.messages.len(),
                last_activity: s.last_activity,
            })
            .collect();
        summaries.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        summaries
    }

    /// Messages of a session in API form. Unknown ids yield an empty list.
    pub fn render_transcript(&self, id: &str) -> Vec<TranscriptEntry> {
        let Some(session) = self.sessions.get(id) else {
            return Vec::new();
        };
        session
            .messages
            .iter()
            .map(|m| TranscriptEntry {
                entry_type: "message".to_string(),
                message: TranscriptMessage {
                    role: m.role,
                    content: m.content.clone(),
                },
                timestamp: m.timestamp,
            })
            .collect()
    }

    /// Prior turns as a text prompt prefix ending in an assistant cue.
    ///
    /// The external tool keeps no state between invocations, so the
    /// conversation so far is replayed in front of each new prompt.
    pub fn build_context_prefix(&self, id: &str) -> String {
        let Some(session) = self.sessions.get(id) else {
            return String::new();
        };
        if session.messages.is_empty() {
            return String::new();
        }
        let turns: Vec<String> = session
            .messages
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect();
        format!("{}\n\nAssistant: ", turns.join("\n\n"))
    }
}

fn new_session(id: &str, project_path: &str) -> Session {
    let now = Utc::now();
    Session {
        id: id.to_string(),
        project_path: project_path.to_string(),
        project_name: project_name_of(project_path),
        messages: Vec::new(),
        created_at: now,
        last_activity: now,
    }
}

/// Last path segment, or an empty string for paths without one.
pub fn project_name_of(project_path: &str) -> String {
    Path::new(project_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// First user message, truncated, or the placeholder.
fn summarize(session: &Session) -> String {
    let Some(first) = session.messages.iter().find(|m| m.role == Role::User) else {
        return EMPTY_SESSION_SUMMARY.to_string();
    };
    if first.content.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = first.content.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        first.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new("/nonexistent")
    }

    #[test]
    fn append_creates_unknown_session() {
        let reg = registry();
        let session = reg.append_message("s1", Role::User, "hello");
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.project_path, "");

        let listed = reg.list_project_sessions("");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "s1");
        assert_eq!(listed[0].message_count, 1);
        assert_eq!(listed[0].summary, "hello");
    }

    #[test]
    fn create_overwrites_existing_session() {
        let reg = registry();
        reg.append_message("s1", Role::User, "first");
        let session = reg.create_session("s1", "/home/me/project");
        assert!(session.messages.is_empty());
        assert_eq!(reg.get_session("s1").unwrap().project_name, "project");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn listing_filters_by_project_name_and_orders_by_activity() {
        let reg = registry();
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        for (id, project, offset) in [("old", "app", 0), ("new", "app", 60), ("other", "lib", 30)] {
            let mut s = new_session(id, project);
            s.last_activity = base + Duration::seconds(offset);
            reg.insert(s);
        }

        let listed = reg.list_project_sessions("/work/app");
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert!(listed.iter().all(|s| s.summary == EMPTY_SESSION_SUMMARY));
    }

    #[test]
    fn summary_uses_first_user_message_and_truncates() {
        let reg = registry();
        reg.create_session("s1", "/p/app");
        reg.append_message("s1", Role::Assistant, "greeting from assistant");
        reg.append_message("s1", Role::User, &"x".repeat(60));
        reg.append_message("s1", Role::User, "second");

        let listed = reg.list_project_sessions("/p/app");
        assert_eq!(listed[0].summary, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn summary_without_user_message_is_placeholder() {
        let reg = registry();
        reg.create_session("s1", "/p/app");
        reg.append_message("s1", Role::Assistant, "only me");
        assert_eq!(reg.list_project_sessions("app")[0].summary, EMPTY_SESSION_SUMMARY);
    }

    #[test]
    fn summary_of_exactly_fifty_chars_is_untouched() {
        let reg = registry();
        let text = "é".repeat(50);
        reg.append_message("s1", Role::User, &text);
        assert_eq!(reg.list_project_sessions("")[0].summary, text);
    }

    #[test]
    fn context_prefix_replays_turns() {
        let reg = registry();
        reg.append_message("s1", Role::User, "hi");
        reg.append_message("s1", Role::Assistant, "hello");
        assert_eq!(
            reg.build_context_prefix("s1"),
            "User: hi\n\nAssistant: hello\n\nAssistant: "
        );
    }

    #[test]
    fn context_prefix_of_unknown_or_empty_session_is_empty() {
        let reg = registry();
        assert_eq!(reg.build_context_prefix("missing"), "");
        reg.create_session("empty", "/p");
        assert_eq!(reg.build_context_prefix("empty"), "");
    }

    #[test]
    fn transcript_renders_messages_in_order() {
        let reg = registry();
        reg.append_message("s1", Role::User, "question");
        reg.append_message("s1", Role::Assistant, "answer");

        let transcript = reg.render_transcript("s1");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].entry_type, "message");
        assert_eq!(transcript[0].message.role, Role::User);
        assert_eq!(transcript[1].message.content, "answer");

        let json = serde_json::to_value(&transcript[0]).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["message"]["role"], "user");
        assert!(json["timestamp"].is_string());

        assert!(reg.render_transcript("missing").is_empty());
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let reg = std::sync::Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let reg = reg.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        reg.append_message("shared", Role::User, &format!("{i}-{j}"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(reg.get_session("shared").unwrap().messages.len(), 200);
    }

    #[test]
    fn project_name_is_last_segment() {
        assert_eq!(project_name_of("/home/me/app"), "app");
        assert_eq!(project_name_of("/home/me/app/"), "app");
        assert_eq!(project_name_of("app"), "app");
        assert_eq!(project_name_of(""), "");
    }
}
