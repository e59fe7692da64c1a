//! Command handlers for the Pokepedai CLI

pub mod chat;
pub mod send;
pub mod sessions;
pub mod special_commands;

use crate::client::ChatClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionStore, SnapshotStore};

/// Assemble a session store from the effective configuration
///
/// Wires the chat client (resolved base URL, configured timeout) to the
/// snapshot store (configured or default location). The returned store is
/// not yet initialized.
pub fn build_store(config: &Config) -> Result<SessionStore> {
    let client = ChatClient::new(config.resolve_base_url())?;

    let snapshots = match &config.storage.sessions_file {
        Some(path) => SnapshotStore::new_with_path(path)?,
        None => SnapshotStore::new()?,
    };

    Ok(SessionStore::new(
        client,
        snapshots,
        config.request_timeout(),
    ))
}

/// Shorten a session id for display
///
/// Session ids look like `session-<uuid>`; the first sixteen characters
/// ("session-" plus eight hex digits) are enough to identify one in a
/// listing and can be passed back anywhere a session id is accepted.
pub fn short_id(id: &str) -> &str {
    if id.len() > 16 {
        &id[..16]
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_truncates_long_ids() {
        let id = "session-0123456789abcdef-rest";
        assert_eq!(short_id(id), "session-01234567");
    }

    #[test]
    fn test_short_id_keeps_short_ids() {
        assert_eq!(short_id("session-x"), "session-x");
    }
}
