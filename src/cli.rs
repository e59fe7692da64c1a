//! Command-line interface definition for Pokepedai
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot sends, and session
//! management.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pokepedai - chat with the Pokepedai backend from your terminal
///
/// Conversations are kept as named sessions, persisted locally between
/// runs.
#[derive(Parser, Debug, Clone)]
#[command(name = "pokepedai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the session snapshot file location
    #[arg(long)]
    pub sessions_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Pokepedai
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Resume a specific session (full id or unique prefix)
        #[arg(short, long)]
        session: Option<String>,

        /// Start in a fresh session instead of the last active one
        #[arg(short, long)]
        new: bool,
    },

    /// Send a single message and print the reply
    Send {
        /// The message to send
        message: String,

        /// Target session (full id or unique prefix); defaults to the
        /// active session
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Manage chat sessions
    Sessions {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List all sessions
    List,

    /// Create a new empty session and make it active
    New,

    /// Empty a session's message log (keeps the title)
    Clear {
        /// Session to clear (full id or unique prefix)
        id: String,
    },

    /// Delete a session
    Delete {
        /// Session to delete (full id or unique prefix)
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            base_url: None,
            sessions_file: None,
            verbose: false,
            command: Commands::Sessions {
                command: SessionCommand::List,
            },
        }
    }
}
