//! Derivation of skill tree state from the graph and a progress snapshot.
//!
//! # Algorithm
//!
//! 1. Every node without prerequisites is unlocked.
//! 2. Any other node is unlocked iff each prerequisite has a progress record
//!    whose mastery meets *that prerequisite's* `mastery_requirement`.
//! 3. A node is completed when it is unlocked and its own mastery meets the
//!    completion threshold.
//! 4. Available = unlocked − completed.
//! 5. Current level = highest level among completed nodes, or 1.
//! 6. Total XP = sum of experience rewards over completed nodes.
//!
//! The test in step 2 only looks at a node's own prerequisites, so the
//! iteration order does not matter. Nothing is accumulated across calls:
//! the same inputs always give structurally equal output.

use lexis_graph::{NodeId, SkillGraph, SkillNode};
use lexis_progress::ProgressMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mastery at or above which a node counts as completed.
pub const DEFAULT_COMPLETION_THRESHOLD: u8 = 90;

/// Level reported before anything is completed.
pub const BASE_LEVEL: u32 = 1;

/// Fully derived progression state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillTreeState {
    pub progress: ProgressMap,
    pub current_level: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub unlocked_nodes: BTreeSet<NodeId>,
    pub completed_nodes: BTreeSet<NodeId>,
    pub available_nodes: BTreeSet<NodeId>,
}

impl SkillTreeState {
    /// True if `id` is unlocked.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_nodes.contains(id)
    }

    /// True if `id` is completed.
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_nodes.contains(id)
    }

    /// True if `id` is unlocked but not completed.
    pub fn is_available(&self, id: &str) -> bool {
        self.available_nodes.contains(id)
    }
}

/// Pure resolver over (graph, progress).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    completion_threshold: u8,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_COMPLETION_THRESHOLD)
    }
}

impl Resolver {
    /// Create a resolver with the given completion threshold.
    pub const fn new(completion_threshold: u8) -> Self {
        Self {
            completion_threshold,
        }
    }

    /// The completion threshold in use.
    pub const fn completion_threshold(&self) -> u8 {
        self.completion_threshold
    }

    /// Derive the full state.
    pub fn resolve(&self, graph: &SkillGraph, progress: &ProgressMap) -> SkillTreeState {
        let unlocked_nodes: BTreeSet<NodeId> = graph
            .nodes()
            .iter()
            .filter(|node| prerequisites_met(graph, progress, node))
            .map(|node| node.id.clone())
            .collect();

        let completed: Vec<&SkillNode> = graph
            .nodes()
            .iter()
            .filter(|node| unlocked_nodes.contains(&node.id))
            .filter(|node| {
                progress
                    .get(&node.id)
                    .is_some_and(|p| p.mastery_level >= self.completion_threshold)
            })
            .collect();

        let current_level = completed
            .iter()
            .map(|node| node.level)
            .max()
            .unwrap_or(BASE_LEVEL);
        let total_xp: u64 = completed.iter().map(|node| node.rewards.experience).sum();
        let completed_nodes: BTreeSet<NodeId> =
            completed.iter().map(|node| node.id.clone()).collect();
        let available_nodes = unlocked_nodes.difference(&completed_nodes).cloned().collect();

        tracing::debug!(
            unlocked = unlocked_nodes.len(),
            completed = completed_nodes.len(),
            total_xp,
            current_level,
            "skill tree resolved"
        );

        SkillTreeState {
            progress: progress.clone(),
            current_level,
            total_xp,
            unlocked_nodes,
            completed_nodes,
            available_nodes,
        }
    }
}

/// Whether every prerequisite of `node` is mastered to its own requirement.
///
/// Roots always pass.
pub fn prerequisites_met(graph: &SkillGraph, progress: &ProgressMap, node: &SkillNode) -> bool {
    node.prerequisites.iter().all(|prereq_id| {
        match (graph.get(prereq_id.as_str()), progress.get(prereq_id)) {
            (Some(prereq), Some(record)) => record.mastery_level >= prereq.mastery_requirement,
            _ => false,
        }
    })
}

/// Standalone unlock check using the same rule as [`Resolver::resolve`].
///
/// Unknown ids are not unlockable.
pub fn is_node_unlockable(graph: &SkillGraph, progress: &ProgressMap, id: &str) -> bool {
    graph
        .get(id)
        .is_some_and(|node| prerequisites_met(graph, progress, node))
}

/// Share of the graph completed, 0-100. An empty graph is 0% complete.
pub fn completion_percentage(state: &SkillTreeState, graph: &SkillGraph) -> u8 {
    if graph.is_empty() {
        return 0;
    }
    let ratio = state.completed_nodes.len() as f64 / graph.len() as f64;
    (ratio * 100.0).round() as u8
}
