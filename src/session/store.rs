//! Session store: owns the session collection and the submit lifecycle
//!
//! All mutation of the session collection funnels through this store. It
//! restores the persisted snapshot once at startup, keeps the active-session
//! invariant (a non-empty collection always has a valid active id, and the
//! collection is never empty after initialization), and re-persists the full
//! snapshot after every mutation. At most one submission may be in flight
//! for the whole store; extra attempts are dropped, not queued.

use std::time::Duration;

use crate::client::{ChatClient, SendError};
use crate::history::build_history_payload;
use crate::session::snapshot::{Snapshot, SnapshotStore};
use crate::session::types::{derive_title, ChatSession, Message, DEFAULT_SESSION_TITLE};

/// Wording for a request that timed out (distinct from unreachable)
pub const TIMEOUT_FAILURE_TEXT: &str =
    "Hmm, the server is taking too long to respond. Please try again in a moment.";

/// Wording for a server that could not be reached at all
pub const NETWORK_FAILURE_TEXT: &str =
    "I couldn't reach the server. Please check your connection and try again.";

/// Generic apology when a failure carries no usable description
pub const GENERIC_FAILURE_TEXT: &str =
    "Oops, something went wrong while generating a response. Please try again.";

/// Outcome of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The message was sent and a reply (or failure text) was appended
    Completed,
    /// A guard rejected the attempt; nothing was appended or sent
    Rejected,
}

/// Owner of the session collection and the send/receive flow
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active_session_id: Option<String>,
    input: String,
    busy: bool,
    initialized: bool,
    snapshots: SnapshotStore,
    client: ChatClient,
    request_timeout: Duration,
}

impl SessionStore {
    /// Create an uninitialized store
    ///
    /// Every operation except [`initialize`](Self::initialize) is a no-op
    /// until initialization has run.
    pub fn new(client: ChatClient, snapshots: SnapshotStore, request_timeout: Duration) -> Self {
        Self {
            sessions: Vec::new(),
            active_session_id: None,
            input: String::new(),
            busy: false,
            initialized: false,
            snapshots,
            client,
            request_timeout,
        }
    }

    /// Restore the persisted snapshot or start fresh
    ///
    /// Runs at most once per store; later calls are no-ops. A stored active
    /// id that no longer references a member falls back to the first
    /// session. Snapshot read failures are logged and swallowed; the store
    /// starts fresh in that case.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        match self.snapshots.load() {
            Ok(Some(snapshot)) if !snapshot.sessions.is_empty() => {
                let fallback_id = snapshot.sessions[0].id.clone();
                let active_id = snapshot
                    .active_session_id
                    .filter(|id| snapshot.sessions.iter().any(|s| &s.id == id))
                    .unwrap_or(fallback_id);

                tracing::info!(
                    "Restored {} chat session(s) from {}",
                    snapshot.sessions.len(),
                    self.snapshots.path().display()
                );

                self.sessions = snapshot.sessions;
                self.active_session_id = Some(active_id);
                self.initialized = true;
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to load chat sessions from storage: {}", e);
            }
        }

        let fresh = ChatSession::new();
        self.active_session_id = Some(fresh.id.clone());
        self.sessions = vec![fresh];
        self.initialized = true;
        self.persist();
    }

    /// Whether initialization has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a submission is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// All sessions, newest-created first
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Id of the active session, if initialized
    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    /// The active session, if initialized
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// The pending input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pending input buffer
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Resolve a full id or unique id prefix to a session id
    ///
    /// Lets CLI users reference sessions by the short id shown in listings.
    /// Returns `None` when nothing matches or the prefix is ambiguous.
    pub fn resolve_session_id(&self, id_or_prefix: &str) -> Option<String> {
        if let Some(session) = self.sessions.iter().find(|s| s.id == id_or_prefix) {
            return Some(session.id.clone());
        }

        let mut matches = self
            .sessions
            .iter()
            .filter(|s| s.id.starts_with(id_or_prefix));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id.clone())
    }

    /// Insert a new empty session at the front and make it active
    ///
    /// Clears any pending input. Returns the new session's id.
    pub fn create_session(&mut self) -> Option<String> {
        if !self.initialized {
            return None;
        }

        let session = ChatSession::new();
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.active_session_id = Some(id.clone());
        self.input.clear();
        self.persist();
        Some(id)
    }

    /// Make the given session active
    ///
    /// No-op (returns false) if the session does not exist. Clears any
    /// pending input on success.
    pub fn select_session(&mut self, id: &str) -> bool {
        if !self.initialized || !self.sessions.iter().any(|s| s.id == id) {
            return false;
        }

        self.active_session_id = Some(id.to_string());
        self.input.clear();
        self.persist();
        true
    }

    /// Empty the message log of the given session
    ///
    /// The title is kept; only the log and the timestamp change. No-op
    /// (returns false) if the session does not exist.
    pub fn clear_session(&mut self, id: &str) -> bool {
        if !self.initialized {
            return false;
        }

        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        session.messages.clear();
        session.touch();
        self.persist();
        true
    }

    /// Remove the given session
    ///
    /// If the removed session was active, the first remaining session
    /// becomes active. Deleting the last session immediately creates a
    /// fresh empty one so the collection is never left empty. No-op
    /// (returns false) if the session does not exist.
    pub fn delete_session(&mut self, id: &str) -> bool {
        if !self.initialized || !self.sessions.iter().any(|s| s.id == id) {
            return false;
        }

        self.sessions.retain(|s| s.id != id);

        if self.sessions.is_empty() {
            let fresh = ChatSession::new();
            self.active_session_id = Some(fresh.id.clone());
            self.sessions.push(fresh);
        } else if self.active_session_id.as_deref() == Some(id) {
            self.active_session_id = Some(self.sessions[0].id.clone());
        }

        self.persist();
        true
    }

    /// Send a user message and append the outcome to the session log
    ///
    /// The full submit flow: guard, optimistically append the user message
    /// (deriving the title from the first message), build the history
    /// payload from the log as it was *before* the append, perform the one
    /// network call, and append the reply or a classified failure text as an
    /// assistant message. The store always returns to idle, whatever branch
    /// was taken.
    ///
    /// Guards reject (no-op) when the store is uninitialized, the session
    /// does not exist, the trimmed input is empty, or another submission is
    /// already in flight.
    pub async fn submit(&mut self, session_id: &str, text: &str) -> SubmitOutcome {
        if !self.initialized || self.busy {
            return SubmitOutcome::Rejected;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Rejected;
        }

        let Some(pos) = self.sessions.iter().position(|s| s.id == session_id) else {
            return SubmitOutcome::Rejected;
        };

        self.busy = true;

        // History covers prior turns only, never the message being sent.
        let history = build_history_payload(&self.sessions[pos].messages);

        let session = &mut self.sessions[pos];
        if session.messages.is_empty() && session.title == DEFAULT_SESSION_TITLE {
            session.title = derive_title(trimmed);
        }
        session.messages.push(Message::user(trimmed));
        session.touch();
        self.input.clear();
        self.persist();

        let outcome = self
            .client
            .send_message(&history, trimmed, self.request_timeout)
            .await;

        let assistant_text = match outcome {
            Ok(result) if result.ok => self.client.get_reply_message(&result),
            Ok(result) => self.client.get_error_message(&result),
            Err(err) => {
                tracing::warn!("Chat request failed: {}", err);
                describe_send_failure(&err)
            }
        };

        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            session.messages.push(Message::assistant(assistant_text));
            session.touch();
        }
        self.persist();

        self.busy = false;
        SubmitOutcome::Completed
    }

    /// Write the whole snapshot, best-effort
    ///
    /// Persistence is fire-and-forget: a failure is logged and otherwise
    /// ignored, never surfaced to the user and never retried.
    fn persist(&self) {
        let snapshot = Snapshot {
            sessions: self.sessions.clone(),
            active_session_id: self.active_session_id.clone(),
        };

        if let Err(e) = self.snapshots.save(&snapshot) {
            tracing::warn!("Failed to save chat sessions to storage: {}", e);
        }
    }

    #[cfg(test)]
    fn force_busy(&mut self) {
        self.busy = true;
    }
}

/// Turn a transport failure into user-facing wording
///
/// Priority order: timeout, network unreachable, a failure carrying its own
/// description, then the generic apology.
fn describe_send_failure(err: &SendError) -> String {
    match err {
        SendError::Timeout => TIMEOUT_FAILURE_TEXT.to_string(),
        SendError::Network => NETWORK_FAILURE_TEXT.to_string(),
        SendError::Other(detail) if !detail.is_empty() => detail.clone(),
        SendError::Other(_) => GENERIC_FAILURE_TEXT.to_string(),
    }
}
