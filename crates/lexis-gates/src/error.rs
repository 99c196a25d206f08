//! Error types for feature catalogues.

use thiserror::Error;

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors loading a feature catalogue.
///
/// Evaluation itself never fails: unknown feature ids simply read as
/// locked.
#[derive(Debug, Error)]
pub enum GateError {
    /// Two features share an id
    #[error("duplicate feature id: {0}")]
    DuplicateFeature(String),

    /// Catalogue definition could not be parsed
    #[error("feature catalogue parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
