//! Error types for satzliste-core.

use thiserror::Error;

/// Result type alias using LibraryError.
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors raised by mutations of the sentence library.
///
/// Lookups never fail: an unknown key is reported as `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("sentence not found: {0}")]
    SentenceNotFound(String),

    #[error("source text is empty")]
    EmptySource,

    #[error("target text is empty")]
    EmptyTarget,

    #[error("selection contains no words")]
    EmptySelection,
}

/// Errors raised while encoding or decoding a persisted payload.
///
/// Callers loading user data treat any of these as "absent".
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json array")]
    NotAnArray,

    #[error("expected a json object")]
    NotAnObject,
}
