//! Pokepedai - command-line chat client library
//!
//! This library provides the core functionality for the Pokepedai chat
//! client: bounded history payloads, the backend HTTP client, and persisted
//! multi-session conversation state.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `history`: bounded history-payload construction for backend context
//! - `client`: the `POST /chat` HTTP client with timeout and failure classification
//! - `session`: session types, snapshot persistence, and the session store
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: handlers behind each CLI subcommand
//!
//! # Example
//!
//! ```no_run
//! use pokepedai::client::ChatClient;
//! use pokepedai::session::{SessionStore, SnapshotStore};
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = ChatClient::new("http://localhost:8080")?;
//! let snapshots = SnapshotStore::new()?;
//! let mut store = SessionStore::new(client, snapshots, Duration::from_secs(300));
//! store.initialize();
//! assert!(store.active_session().is_some());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod session;

// Re-export commonly used types
pub use client::{ChatClient, ChatResult, SendError};
pub use config::Config;
pub use error::{PokepedaiError, Result};
pub use history::{build_history_payload, HistoryItem};
pub use session::{ChatSession, Message, Role, SessionStore, SnapshotStore, SubmitOutcome};
