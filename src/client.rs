//! HTTP client for the Pokepedai chat backend
//!
//! This module wraps the single `POST /chat` call: it carries the trimmed
//! history plus the new message, enforces a caller-supplied timeout, and
//! normalizes both responses and transport failures so the session store can
//! always turn the outcome into a displayable assistant message.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{PokepedaiError, Result};
use crate::history::HistoryItem;

/// Default request timeout (five minutes, matching the backend's worst case)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Fallback shown when the backend reply is absent or blank
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I didn't get a response.";

/// Fallback for 5xx responses with no message field
pub const SERVER_ERROR_FALLBACK: &str =
    "The server had an internal error. Please try again in a moment.";

/// Fallback for non-2xx, non-5xx responses with no message field
pub const REQUEST_ERROR_FALLBACK: &str = "I couldn't process that request. Please try again.";

/// Request body for `POST /chat`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    history: &'a [HistoryItem],
    message: &'a str,
}

/// Structured fields the backend may return
///
/// Success responses carry `reply`; failures carry one of `error`, `detail`,
/// or `message`. An unparseable body deserializes to the all-`None` default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseBody {
    /// Assistant reply text on success
    #[serde(default)]
    pub reply: Option<String>,
    /// Primary error description
    #[serde(default)]
    pub error: Option<String>,
    /// Secondary error description (FastAPI-style)
    #[serde(default)]
    pub detail: Option<String>,
    /// Tertiary error description
    #[serde(default)]
    pub message: Option<String>,
}

/// Normalized outcome of a completed HTTP exchange
///
/// A non-2xx status is a failed exchange (`ok == false`) regardless of body
/// shape; transport-level failures never produce a `ChatResult` and surface
/// as [`SendError`] instead.
#[derive(Debug, Clone)]
pub struct ChatResult {
    /// Whether the response status was 2xx
    pub ok: bool,
    /// HTTP status code
    pub status: u16,
    /// Parsed body, empty if the body was not valid JSON
    pub data: ChatResponseBody,
}

/// Transport-level failure, classified for user-facing wording
///
/// The caller needs to tell a slow server apart from an unreachable one, so
/// timeouts and connection failures get their own variants.
#[derive(Error, Debug)]
pub enum SendError {
    /// No response arrived within the timeout and the request was cancelled
    #[error("request timed out")]
    Timeout,

    /// The server could not be reached at all
    #[error("could not reach the server")]
    Network,

    /// Any other transport failure, carrying its own description
    #[error("{0}")]
    Other(String),
}

/// Client for the Pokepedai chat backend
///
/// # Examples
///
/// ```no_run
/// use pokepedai::client::{ChatClient, DEFAULT_REQUEST_TIMEOUT};
///
/// # async fn example() -> pokepedai::error::Result<()> {
/// let client = ChatClient::new("http://localhost:8080")?;
/// let result = client
///     .send_message(&[], "who is mewtwo?", DEFAULT_REQUEST_TIMEOUT)
///     .await;
/// # Ok(())
/// # }
/// ```
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    /// Create a new chat client for the given base URL
    ///
    /// # Errors
    ///
    /// Returns `PokepedaiError::Client` if HTTP client initialization fails
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pokepedai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PokepedaiError::Client(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into();
        tracing::debug!("Initialized chat client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// The base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a message with its trimmed history to `POST /chat`
    ///
    /// The request is cancelled if no response arrives within `timeout`,
    /// surfacing as [`SendError::Timeout`]. A response with an unparseable
    /// body is not a failure of the call itself: it yields a `ChatResult`
    /// with empty data, and `ok` still reflects the status class.
    pub async fn send_message(
        &self,
        history: &[HistoryItem],
        message: &str,
        timeout: Duration,
    ) -> std::result::Result<ChatResult, SendError> {
        let body = ChatRequest { history, message };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status().as_u16();
        let ok = response.status().is_success();

        // Unparseable bodies collapse to the empty default rather than
        // failing the call.
        let data = response
            .json::<ChatResponseBody>()
            .await
            .unwrap_or_default();

        tracing::debug!("Chat exchange finished: status={}, ok={}", status, ok);

        Ok(ChatResult { ok, status, data })
    }

    /// Extract the reply text from a successful exchange
    ///
    /// Returns the trimmed `reply` field, or [`EMPTY_REPLY_FALLBACK`] if it
    /// is absent or blank.
    pub fn get_reply_message(&self, result: &ChatResult) -> String {
        let raw = result.data.reply.as_deref().unwrap_or("").trim();
        if raw.is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else {
            raw.to_string()
        }
    }

    /// Extract a human-readable error from a failed exchange
    ///
    /// Prefers the backend's own wording (`error`, then `detail`, then
    /// `message`); when none is present, falls back by status class.
    pub fn get_error_message(&self, result: &ChatResult) -> String {
        result
            .data
            .error
            .as_deref()
            .or(result.data.detail.as_deref())
            .or(result.data.message.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if result.status >= 500 {
                    SERVER_ERROR_FALLBACK.to_string()
                } else {
                    REQUEST_ERROR_FALLBACK.to_string()
                }
            })
    }
}

/// Classify a reqwest failure into the transport taxonomy
///
/// Priority order: explicit timeout, then connection failure, then anything
/// else with its own description.
fn classify_send_error(err: reqwest::Error) -> SendError {
    if err.is_timeout() {
        SendError::Timeout
    } else if err.is_connect() {
        SendError::Network
    } else {
        SendError::Other(err.to_string())
    }
}
