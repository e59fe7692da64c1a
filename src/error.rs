//! Error types for Pokepedai
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Pokepedai operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, backend interactions, and session storage.
#[derive(Error, Debug)]
pub enum PokepedaiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat client errors (request construction, client initialization)
    #[error("Client error: {0}")]
    Client(String),

    /// Session snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Referenced session does not exist
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Pokepedai operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
