//! One-shot send
//!
//! Submits a single message against the active (or named) session and
//! prints the reply, for scripting and quick questions. The exchange lands
//! in the session log exactly as it would from the interactive loop.

use anyhow::bail;

use crate::commands::build_store;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Role, SubmitOutcome};

/// Handle `pokepedai send <message>`
pub async fn run_send(config: Config, message: String, session: Option<String>) -> Result<()> {
    let mut store = build_store(&config)?;
    store.initialize();

    let target = match session {
        Some(wanted) => match store.resolve_session_id(&wanted) {
            Some(id) => id,
            None => bail!("No session matches '{}'", wanted),
        },
        None => match store.active_session_id() {
            Some(id) => id.to_string(),
            None => bail!("No active session"),
        },
    };

    match store.submit(&target, &message).await {
        SubmitOutcome::Completed => {
            let reply = store
                .sessions()
                .iter()
                .find(|s| s.id == target)
                .and_then(|s| s.messages.iter().rev().find(|m| m.role == Role::Assistant))
                .map(|m| m.content.clone());

            match reply {
                Some(text) => println!("{}", text),
                None => bail!("No reply was recorded"),
            }
            Ok(())
        }
        SubmitOutcome::Rejected => bail!("Message was empty or could not be sent"),
    }
}
