//! Error types for the external lookup.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. The lookup probe
/// collapses every variant into [`LookupError::Unavailable`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The external lookup did not produce an address.
///
/// Timeouts, transport failures, non-2xx statuses and unreadable bodies
/// all end up here. `reason` is kept for logging; callers must not branch
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No address could be obtained this cycle.
    #[error("External address unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause, for logs only.
        reason: String,
    },
}

impl LookupError {
    /// Creates an `Unavailable` error with the given reason.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns the logged cause.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Unavailable { reason } => reason,
        }
    }
}

impl From<HttpError> for LookupError {
    fn from(error: HttpError) -> Self {
        Self::unavailable(error.to_string())
    }
}
