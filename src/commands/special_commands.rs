//! Special commands parser for interactive chat
//!
//! This module parses the slash commands available during an interactive
//! chat session: creating, listing, switching, clearing, and deleting
//! sessions, plus help and exit. Commands are prefixed with `/` and are
//! case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands act on the session store directly rather than being sent
/// to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Create a new empty session and switch to it
    NewSession,

    /// List all sessions with the active one highlighted
    ListSessions,

    /// Switch to another session by id or unique prefix
    SwitchSession(String),

    /// Empty the active session's message log
    ClearSession,

    /// Delete the active session
    DeleteSession,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the backend
    None,
}

/// Parse a user input string into a special command
///
/// Commands are case-insensitive. Input not starting with `/` is never a
/// command, except the bare words `exit` and `quit`.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a valid command, and `CommandError::MissingArgument` if a command
/// requires an argument that was not provided.
///
/// # Examples
///
/// ```
/// use pokepedai::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/new").unwrap();
/// assert_eq!(cmd, SpecialCommand::NewSession);
///
/// let cmd = parse_special_command("what evolves into gengar?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/frobnicate").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/new" => Ok(SpecialCommand::NewSession),
        "/sessions" | "/list" => Ok(SpecialCommand::ListSessions),
        "/clear" => Ok(SpecialCommand::ClearSession),
        "/delete" => Ok(SpecialCommand::DeleteSession),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/quit" | "/exit" | "exit" | "quit" => Ok(SpecialCommand::Exit),

        "/switch" => Err(CommandError::MissingArgument {
            command: "/switch".to_string(),
            usage: "/switch <session id or prefix>".to_string(),
        }),
        _ if lower.starts_with("/switch ") => {
            let arg = trimmed[8..].trim();
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/switch".to_string(),
                    usage: "/switch <session id or prefix>".to_string(),
                })
            } else {
                Ok(SpecialCommand::SwitchSession(arg.to_string()))
            }
        }

        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Help text listing every special command
pub fn help_text() -> &'static str {
    "Available commands:\n\
     /new                 Start a new chat session\n\
     /sessions            List all sessions\n\
     /switch <id>         Switch to another session\n\
     /clear               Empty the current session\n\
     /delete              Delete the current session\n\
     /help                Show this help\n\
     /quit                Exit (also: exit, quit)"
}
