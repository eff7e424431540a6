//! Storage error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] satzliste_core::CodecError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
