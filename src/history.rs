//! History trimming for backend payloads
//!
//! The backend accepts a bounded window of prior conversation turns as
//! context. This module reduces a full session log to that window: at most
//! [`MAX_HISTORY_MESSAGES`] messages and [`MAX_HISTORY_CHARS`] total
//! characters, always the most recent contiguous suffix of the log, emitted
//! oldest-to-newest. Messages are dropped whole, never truncated.

use serde::{Deserialize, Serialize};

use crate::session::{Message, Role};

/// Maximum number of prior messages sent as context
pub const MAX_HISTORY_MESSAGES: usize = 8;

/// Maximum cumulative character count across the included messages
pub const MAX_HISTORY_CHARS: usize = 3200;

/// One prior turn in the shape the backend expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Turn author
    pub role: Role,
    /// Turn text
    pub message: String,
}

/// Build the bounded history payload for a session log
///
/// Walks the log from most recent to oldest, accumulating messages while
/// both budgets hold. The first message that would exceed either budget is
/// excluded entirely, along with everything older than it. The message the
/// user is currently composing is never part of this payload; it is passed
/// to the send operation separately.
///
/// # Examples
///
/// ```
/// use pokepedai::history::build_history_payload;
/// use pokepedai::session::Message;
///
/// let log = vec![Message::user("hi"), Message::assistant("hello")];
/// let payload = build_history_payload(&log);
/// assert_eq!(payload.len(), 2);
/// assert_eq!(payload[0].message, "hi");
/// ```
pub fn build_history_payload(messages: &[Message]) -> Vec<HistoryItem> {
    let mut trimmed: Vec<&Message> = Vec::new();
    let mut total_chars = 0usize;

    for msg in messages.iter().rev() {
        let length = msg.content.chars().count();

        if trimmed.len() >= MAX_HISTORY_MESSAGES || total_chars + length > MAX_HISTORY_CHARS {
            break;
        }

        trimmed.push(msg);
        total_chars += length;
    }

    trimmed
        .into_iter()
        .rev()
        .map(|m| HistoryItem {
            role: m.role,
            message: m.content.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: Role, content: &str) -> Message {
        Message {
            id: 0,
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_log_yields_empty_payload() {
        assert!(build_history_payload(&[]).is_empty());
    }

    #[test]
    fn test_item_budget_keeps_most_recent_eight() {
        let log: Vec<Message> = (0..12)
            .map(|i| message(Role::User, &format!("m{}", i)))
            .collect();

        let payload = build_history_payload(&log);
        assert_eq!(payload.len(), MAX_HISTORY_MESSAGES);
        // Oldest-to-newest among the selected suffix
        assert_eq!(payload[0].message, "m4");
        assert_eq!(payload[7].message, "m11");
    }

    #[test]
    fn test_char_budget_drops_oldest_first() {
        // Three messages of 1500 chars each; only the two most recent fit
        let log = vec![
            message(Role::User, &"a".repeat(1500)),
            message(Role::Assistant, &"b".repeat(1500)),
            message(Role::User, &"c".repeat(1500)),
        ];

        let payload = build_history_payload(&log);
        assert_eq!(payload.len(), 2);
        assert!(payload[0].message.starts_with('b'));
        assert!(payload[1].message.starts_with('c'));
    }

    #[test]
    fn test_single_overlong_message_is_dropped_whole() {
        let log = vec![message(Role::User, &"x".repeat(MAX_HISTORY_CHARS + 1))];
        assert!(build_history_payload(&log).is_empty());
    }

    #[test]
    fn test_overlong_message_blocks_everything_older() {
        // The walk stops at the first budget violation, so messages older
        // than an overlong one are excluded even if they would fit alone.
        let log = vec![
            message(Role::User, "short and sweet"),
            message(Role::Assistant, &"y".repeat(MAX_HISTORY_CHARS + 1)),
            message(Role::User, "recent"),
        ];

        let payload = build_history_payload(&log);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].message, "recent");
    }

    #[test]
    fn test_output_is_contiguous_suffix_in_order() {
        let log: Vec<Message> = (0..20)
            .map(|i| message(Role::User, &format!("message-{:02}", i)))
            .collect();

        let payload = build_history_payload(&log);
        let start = log.len() - payload.len();
        for (offset, item) in payload.iter().enumerate() {
            assert_eq!(item.message, log[start + offset].content);
        }
    }

    #[test]
    fn test_short_alternating_log_survives_intact() {
        // [{user,"hi"},{assistant,"hello"}] x5: 10 messages, well under both
        // budgets, so the whole log goes through untouched.
        let mut log = Vec::new();
        for _ in 0..5 {
            log.push(message(Role::User, "hi"));
            log.push(message(Role::Assistant, "hello"));
        }

        let payload = build_history_payload(&log);
        // Item budget still applies: only the 8 most recent survive
        assert_eq!(payload.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(payload[0].role, Role::User);
        assert_eq!(payload[0].message, "hi");
        assert_eq!(payload[7].message, "hello");
    }

    #[test]
    fn test_budgets_hold_for_arbitrary_logs() {
        let log: Vec<Message> = (0..50)
            .map(|i| message(Role::User, &"z".repeat((i * 137) % 900)))
            .collect();

        let payload = build_history_payload(&log);
        assert!(payload.len() <= MAX_HISTORY_MESSAGES);
        let total: usize = payload.iter().map(|m| m.message.chars().count()).sum();
        assert!(total <= MAX_HISTORY_CHARS);
    }

    #[test]
    fn test_history_item_serializes_role_and_message() {
        let item = HistoryItem {
            role: Role::Assistant,
            message: "hello".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["message"], "hello");
    }
}
