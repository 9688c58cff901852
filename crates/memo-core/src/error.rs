//! Error types for memo.

use thiserror::Error;

/// Result type alias using memo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a call to the external LLM endpoint, subdivided so callers
/// can tell a user-actionable configuration problem from a transient one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// No API credential configured at all.
    #[error("No LLM credential configured: {0}")]
    MissingCredential(String),

    /// The endpoint rejected the credential.
    #[error("LLM authentication failed: {0}")]
    Auth(String),

    /// The endpoint rate-limited the request.
    #[error("LLM rate limit exceeded: {0}")]
    RateLimit(String),

    /// The request did not complete within the client timeout.
    #[error("LLM request timed out: {0}")]
    Timeout(String),

    /// The endpoint answered with a body the client could not interpret.
    #[error("LLM response was malformed: {0}")]
    Malformed(String),

    /// Transport failure or an unclassified upstream status.
    #[error("LLM request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// Check whether the caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit(_) | Self::Timeout(_) | Self::Request(_)
        )
    }

    /// Stable machine-readable name for error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential(_) => "missing_credential",
            Self::Auth(_) => "auth",
            Self::RateLimit(_) => "rate_limit",
            Self::Timeout(_) => "timeout",
            Self::Malformed(_) => "malformed_response",
            Self::Request(_) => "request",
        }
    }
}

/// Core error type for memo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// Share link not found
    #[error("Share link not found: {0}")]
    ShareNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Link exists but was revoked
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Link exists but is past its expiry
    #[error("Gone: {0}")]
    Gone(String),

    /// Link requires a password that was missing or incorrect
    #[error("Password required: {0}")]
    PasswordRequired(String),

    /// External LLM call failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Upstream(UpstreamError::Timeout(e.to_string()))
        } else {
            Error::Upstream(UpstreamError::Request(e.to_string()))
        }
    }
}
