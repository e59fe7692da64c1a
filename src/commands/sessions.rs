//! Session management subcommands
//!
//! Listing uses the same short-id convention the chat REPL shows, so ids
//! from the table can be passed straight to `chat --session` or the other
//! subcommands.

use anyhow::bail;
use chrono::DateTime;
use colored::Colorize;
use prettytable::{format, Table};

use crate::cli::SessionCommand;
use crate::commands::{build_store, short_id};
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;

/// Handle `pokepedai sessions <subcommand>`
pub fn handle_sessions(config: Config, command: SessionCommand) -> Result<()> {
    let mut store = build_store(&config)?;
    store.initialize();

    match command {
        SessionCommand::List => {
            list_sessions(&store);
        }
        SessionCommand::New => {
            if let Some(id) = store.create_session() {
                println!("{}", format!("Created session {}", short_id(&id)).green());
            }
        }
        SessionCommand::Clear { id } => {
            let resolved = resolve_or_bail(&store, &id)?;
            store.clear_session(&resolved);
            println!(
                "{}",
                format!("Cleared session {}", short_id(&resolved)).green()
            );
        }
        SessionCommand::Delete { id } => {
            let resolved = resolve_or_bail(&store, &id)?;
            store.delete_session(&resolved);
            println!(
                "{}",
                format!("Deleted session {}", short_id(&resolved)).green()
            );
        }
    }

    Ok(())
}

/// Resolve a full id or unique prefix, failing with a readable error
fn resolve_or_bail(store: &SessionStore, id_or_prefix: &str) -> Result<String> {
    match store.resolve_session_id(id_or_prefix) {
        Some(id) => Ok(id),
        None => bail!("No session matches '{}'", id_or_prefix),
    }
}

/// Print every session as a table, marking the active one
fn list_sessions(store: &SessionStore) {
    let sessions = store.sessions();

    if sessions.is_empty() {
        println!("{}", "No chat sessions found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "".bold(),
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Last Updated".bold()
    ]);

    for session in sessions {
        let marker = if Some(session.id.as_str()) == store.active_session_id() {
            "*"
        } else {
            ""
        };
        let title = if session.title.chars().count() > 40 {
            let prefix: String = session.title.chars().take(37).collect();
            format!("{}...", prefix)
        } else {
            session.title.clone()
        };
        let updated = DateTime::parse_from_rfc3339(&session.updated_at)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| session.updated_at.clone());

        table.add_row(prettytable::row![
            marker,
            short_id(&session.id).cyan(),
            title,
            session.messages.len(),
            updated
        ]);
    }

    println!("\nChat Sessions:");
    table.printstd();
    println!();
    println!(
        "Use {} to resume a session.",
        "pokepedai chat --session <ID>".cyan()
    );
    println!();
}
