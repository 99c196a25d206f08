//! Error types for progress storage.

use thiserror::Error;

/// Result type for progress store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by storage writes.
///
/// Reads never surface these; they fall back to empty defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend-specific failure
    #[error("Storage error: {0}")]
    Backend(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(e: rocksdb::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}
