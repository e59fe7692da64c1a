//! Session management: data types, persistence, and the session store

pub mod snapshot;
pub mod store;
pub mod types;

pub use snapshot::{Snapshot, SnapshotStore, SNAPSHOT_PATH_ENV};
pub use store::{SessionStore, SubmitOutcome};
pub use types::{
    derive_title, now_rfc3339, ChatSession, Message, Role, DEFAULT_SESSION_TITLE, TITLE_MAX_CHARS,
};
