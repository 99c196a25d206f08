//! Error types for the engine.

use lexis_gates::GateError;
use lexis_graph::GraphError;
use lexis_progress::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the engine.
///
/// Unknown node or feature ids are never errors; lookups return `None`,
/// `false` or an empty list instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The skill graph is malformed
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// A progress write failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The feature catalogue is malformed
    #[error("Feature catalogue error: {0}")]
    Gate(#[from] GateError),

    /// A configuration value could not be used
    #[error("Invalid {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
