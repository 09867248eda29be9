//! Error types for the triage client.
//!
//! Field-level problems inside a well-formed document never surface here:
//! missing or mistyped fields resolve to defaults. Only the failure modes
//! below reach the caller.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// The unified error type for triage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level JSON document could not be parsed at all.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInputError),

    /// Caller-supplied arguments violate a precondition.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// Network transport errors (connection, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (base URL, query, timestamps).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Local I/O errors, e.g. reading a file to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if a remote call failed, either on the wire or with a
    /// non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Protocol(_))
    }
}

/// The top-level document is not JSON.
#[derive(Debug, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct MalformedInputError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for MalformedInputError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(MalformedInputError::from(err))
    }
}

/// Precondition violations, raised before any network activity.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// The window starts after the current time.
    #[error("earliest time {earliest} is later than now ({now})")]
    EarliestInFuture {
        earliest: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The window is inverted.
    #[error("earliest time {earliest} is later than latest time {latest}")]
    InvertedWindow {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },

    /// A local wall-clock time that does not exist (skipped by a DST change).
    #[error("local time {0} does not exist in the current time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error, including failures reading the body.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Non-success responses from the API.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Error message from the response body (if present).
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if the key was rejected.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if the requested sample, task or report does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.error.as_deref() == Some("NOT_FOUND")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid search query.
    #[error("invalid search query '{value}': {reason}")]
    Query { value: String, reason: String },

    /// Unrecognized timestamp text.
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// Unknown environment name.
    #[error("unknown environment '{value}'")]
    Environment { value: String },

    /// Sample or task id that cannot be used as a URL path segment.
    #[error("invalid {kind} id '{value}': {reason}")]
    Id {
        kind: &'static str,
        value: String,
        reason: String,
    },
}
