//! Core chat data types
//!
//! Messages are immutable once appended to a session log; sessions carry
//! their log plus display metadata. Serde field names are camelCase so the
//! persisted snapshot stays byte-compatible with earlier Pokepedai builds.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title for a session that has not received its first message yet
pub const DEFAULT_SESSION_TITLE: &str = "New chat";

/// Number of characters of the first user message used as the session title
pub const TITLE_MAX_CHARS: usize = 30;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Reply (or locally generated failure text) shown as the assistant
    Assistant,
}

impl Role {
    /// String form used in payloads and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message
///
/// The id is the creation timestamp in epoch milliseconds; uniqueness is not
/// strictly guaranteed and nothing may depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Creation timestamp in epoch milliseconds
    pub id: i64,
    /// Message author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a user message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One independent, persisted conversation thread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Unique session identifier, generated at creation
    pub id: String,
    /// Display title; defaults to [`DEFAULT_SESSION_TITLE`] and is set once
    /// to a prefix of the first user message
    pub title: String,
    /// Ordered message log, oldest first
    pub messages: Vec<Message>,
    /// Creation timestamp (RFC-3339)
    pub created_at: String,
    /// Last mutation timestamp (RFC-3339)
    pub updated_at: String,
}

impl ChatSession {
    /// Create a fresh empty session with a generated id
    ///
    /// # Examples
    ///
    /// ```
    /// use pokepedai::session::ChatSession;
    ///
    /// let session = ChatSession::new();
    /// assert!(session.id.starts_with("session-"));
    /// assert_eq!(session.title, "New chat");
    /// assert!(session.messages.is_empty());
    /// ```
    pub fn new() -> Self {
        let now = now_rfc3339();
        Self {
            id: format!("session-{}", Uuid::new_v4()),
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Stamp the session as mutated now
    pub fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a session title from the first user message
///
/// Takes the first [`TITLE_MAX_CHARS`] characters of the trimmed text,
/// falling back to the default title if the slice is empty.
pub fn derive_title(text: &str) -> String {
    let title: String = text.trim().chars().take(TITLE_MAX_CHARS).collect();
    if title.is_empty() {
        DEFAULT_SESSION_TITLE.to_string()
    } else {
        title
    }
}

/// Get current timestamp in RFC-3339 format
///
/// Used consistently for all session timestamps so they stay parseable and
/// comparable.
///
/// # Examples
///
/// ```
/// use pokepedai::session::now_rfc3339;
///
/// let timestamp = now_rfc3339();
/// assert!(timestamp.contains('T'));
/// assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
/// ```
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
