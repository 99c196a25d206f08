//! Lexis Skill Graph
//!
//! The static prerequisite graph of learning nodes.
//!
//! # Model
//!
//! Each [`SkillNode`] lists the nodes it depends on (`prerequisites`) and the
//! nodes that depend on it (`unlocks`). The two relations must be exact
//! inverses. Levels model topological depth: every node sits strictly above
//! all of its prerequisites.
//!
//! # Validation
//!
//! [`SkillGraph::new`] validates once at load time and fails with
//! [`GraphError`] on a missing id, an asymmetric edge, a cycle, or a level
//! ordering violation. A validated graph is immutable.

mod curriculum;
mod error;
mod graph;
mod node;

pub use curriculum::{default_graph, default_nodes};
pub use error::{GraphError, Result};
pub use graph::{validate_graph, SkillGraph, MAX_MASTERY};
pub use node::{NodeId, Position, Rewards, SkillNode};
