//! Error model used by issue-tracker API client operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Represents error conditions raised by issue-tracker interactions.
/// Not-found is deliberately absent from lookup paths that return `None`;
/// the `NotFound` variant is reserved for project-level 404 responses.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("http {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("connection error: {0}")]
    Connection(String),
    #[error("certificate error: {0}")]
    Certificate(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TrackerError {
    /// Converts transport failures into semantic variants. Certificate and
    /// connection problems are recognized by substring because reqwest folds
    /// both into opaque connect errors.
    fn from(err: reqwest::Error) -> Self {
        let text = format!("{err:?}");
        if err.is_timeout() {
            TrackerError::Timeout(err.to_string())
        } else if text.contains("certificate") || text.contains("self signed") {
            TrackerError::Certificate(err.to_string())
        } else if err.is_connect() || text.contains("dns error") {
            TrackerError::Connection(err.to_string())
        } else {
            TrackerError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}
