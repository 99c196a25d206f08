//! Error types for skill graph validation.

use crate::node::NodeId;
use thiserror::Error;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// A malformed static graph definition.
///
/// Raised once at load time. A graph that fails validation makes every
/// derived progression value meaningless, so hosts treat this as fatal
/// to startup.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two nodes share an id
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// A node lists a prerequisite that is not in the graph
    #[error("node {node} lists unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { node: NodeId, prerequisite: NodeId },

    /// A node unlocks a node that is not in the graph
    #[error("node {node} unlocks unknown node {target}")]
    UnknownUnlockTarget { node: NodeId, target: NodeId },

    /// `from -> to` appears on one side of the relation only
    #[error("edge {from} -> {to} is not reciprocated: {missing}")]
    AsymmetricEdge {
        from: NodeId,
        to: NodeId,
        missing: &'static str,
    },

    /// Topological sort could not consume these nodes
    #[error("prerequisite cycle among {} node(s): {}", .remaining.len(), join_ids(.remaining))]
    Cycle { remaining: Vec<NodeId> },

    /// A node does not sit strictly above one of its prerequisites
    #[error("node {node} (level {level}) must be above prerequisite {prerequisite} (level {prerequisite_level})")]
    LevelOrder {
        node: NodeId,
        level: u32,
        prerequisite: NodeId,
        prerequisite_level: u32,
    },

    /// Mastery requirement outside 0..=100
    #[error("node {node} has mastery requirement {value}, expected 0..=100")]
    MasteryRequirementOutOfRange { node: NodeId, value: u8 },

    /// Graph definition could not be parsed
    #[error("graph definition parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
