//! Error types for the cues client library.

use std::io;
use thiserror::Error;

/// Result type alias for cues operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the cues client.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading docs or the session file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Front matter could not be parsed as YAML.
    #[error("Front matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an `error`/`message` payload.
    #[error("API error: {0}")]
    Api(String),

    /// No usable session, or the one-shot token refresh failed.
    #[error("Not logged in or session expired")]
    Unauthorized,

    /// No document exists for the requested slug.
    #[error("Document not found: {0}")]
    DocNotFound(String),

    /// The slug contains empty or traversing path segments.
    #[error("Invalid document slug: {0}")]
    InvalidSlug(String),

    /// Client configuration problem (e.g. a malformed base URL).
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Unauthorized;
        assert_eq!(err.to_string(), "Not logged in or session expired");

        let err = Error::DocNotFound("guide/setup".to_string());
        assert_eq!(err.to_string(), "Document not found: guide/setup");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
