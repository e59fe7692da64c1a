//! Interactive chat session
//!
//! A rustyline read loop over the active session. Plain input is submitted
//! to the backend; slash commands act on the session store (see
//! [`special_commands`](crate::commands::special_commands)).

use anyhow::bail;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::special_commands::{help_text, parse_special_command, SpecialCommand};
use crate::commands::{build_store, short_id};
use crate::config::Config;
use crate::error::Result;
use crate::session::{Message, Role, SessionStore, SubmitOutcome};

/// Run the interactive chat loop
///
/// # Arguments
///
/// * `config` - Effective configuration
/// * `session` - Optional session to resume (full id or unique prefix)
/// * `new` - Start in a fresh session instead of the last active one
pub async fn run_chat(config: Config, session: Option<String>, new: bool) -> Result<()> {
    let mut store = build_store(&config)?;
    store.initialize();

    if new {
        store.create_session();
    } else if let Some(wanted) = session {
        match store.resolve_session_id(&wanted) {
            Some(id) => {
                store.select_session(&id);
            }
            None => bail!("No session matches '{}'", wanted),
        }
    }

    print_banner(&config, &store);

    if let Some(active) = store.active_session() {
        for message in &active.messages {
            print_message(message);
        }
    }

    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(trimmed);

        match parse_special_command(trimmed) {
            Ok(SpecialCommand::None) => {
                let Some(active_id) = store.active_session_id().map(str::to_string) else {
                    continue;
                };

                store.set_input(trimmed);
                match store.submit(&active_id, trimmed).await {
                    SubmitOutcome::Completed => {
                        if let Some(reply) = last_assistant_message(&store, &active_id) {
                            print_message(&reply);
                        }
                    }
                    SubmitOutcome::Rejected => {
                        println!("{}", "Message not sent; a request is already in flight or the input was empty.".yellow());
                    }
                }
            }
            Ok(SpecialCommand::NewSession) => {
                store.create_session();
                println!("{}", "Started a new chat.".green());
            }
            Ok(SpecialCommand::ListSessions) => {
                print_session_list(&store);
            }
            Ok(SpecialCommand::SwitchSession(wanted)) => match store.resolve_session_id(&wanted) {
                Some(id) => {
                    store.select_session(&id);
                    let title = store
                        .active_session()
                        .map(|s| s.title.clone())
                        .unwrap_or_default();
                    println!("{}", format!("Switched to '{}'", title).green());
                    if let Some(active) = store.active_session() {
                        for message in &active.messages {
                            print_message(message);
                        }
                    }
                }
                None => println!("{}", format!("No session matches '{}'", wanted).yellow()),
            },
            Ok(SpecialCommand::ClearSession) => {
                if let Some(id) = store.active_session_id().map(str::to_string) {
                    store.clear_session(&id);
                    println!("{}", "Cleared the current chat.".green());
                }
            }
            Ok(SpecialCommand::DeleteSession) => {
                if let Some(id) = store.active_session_id().map(str::to_string) {
                    store.delete_session(&id);
                    let title = store
                        .active_session()
                        .map(|s| s.title.clone())
                        .unwrap_or_default();
                    println!(
                        "{}",
                        format!("Deleted session; now in '{}'", title).green()
                    );
                }
            }
            Ok(SpecialCommand::Help) => {
                println!("{}", help_text());
            }
            Ok(SpecialCommand::Exit) => break,
            Err(e) => {
                println!("{}", e.to_string().yellow());
            }
        }
    }

    println!("Bye!");
    Ok(())
}

/// Print the startup banner with connection and session details
fn print_banner(config: &Config, store: &SessionStore) {
    println!();
    println!("{}", "Pokepedai".bold().cyan());
    println!("Backend: {}", config.resolve_base_url());
    if let Some(active) = store.active_session() {
        println!("Session: {} ({})", active.title, short_id(&active.id).cyan());
    }
    println!("Type '/help' for commands, '/quit' to leave.");
    println!();
}

/// Print one message with a role-colored prefix
fn print_message(message: &Message) {
    match message.role {
        Role::User => println!("{} {}", "you>".bold().green(), message.content),
        Role::Assistant => println!("{} {}", "pokepedai>".bold().cyan(), message.content),
    }
}

/// Print the session list with the active one marked
fn print_session_list(store: &SessionStore) {
    for session in store.sessions() {
        let marker = if Some(session.id.as_str()) == store.active_session_id() {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  ({} messages)",
            marker,
            short_id(&session.id).cyan(),
            session.title,
            session.messages.len()
        );
    }
}

/// The most recent assistant message of a session, if any
fn last_assistant_message(store: &SessionStore, session_id: &str) -> Option<Message> {
    store
        .sessions()
        .iter()
        .find(|s| s.id == session_id)?
        .messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .cloned()
}
