//! Per-node lifecycle and the rewards a state has earned.
//!
//! ```text
//! Locked ──prerequisites met──▶ Available ──session──▶ InProgress ──mastery ≥ threshold──▶ Completed
//! ```
//!
//! Progress records are overwritten, so a poor session after completion
//! drops the node back to `InProgress`. That regression is real and
//! observable.

use crate::resolver::SkillTreeState;
use lexis_graph::SkillGraph;
use serde::{Deserialize, Serialize};

/// Where a node sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Prerequisites not yet mastered
    Locked,
    /// Unlocked, never attempted
    Available,
    /// Attempted, below the completion threshold
    InProgress,
    /// Mastery at or above the completion threshold
    Completed,
}

impl NodeStatus {
    /// True for every status except `Locked`.
    pub fn is_unlocked(self) -> bool {
        self != NodeStatus::Locked
    }
}

/// Status of `id`, or `None` if the graph does not define it.
pub fn node_status(graph: &SkillGraph, state: &SkillTreeState, id: &str) -> Option<NodeStatus> {
    if !graph.contains(id) {
        return None;
    }
    let status = if state.completed_nodes.contains(id) {
        NodeStatus::Completed
    } else if !state.unlocked_nodes.contains(id) {
        NodeStatus::Locked
    } else if state.progress.contains_key(id) {
        NodeStatus::InProgress
    } else {
        NodeStatus::Available
    };
    Some(status)
}

/// Badges from completed nodes, in declaration order, without duplicates.
pub fn earned_badges(graph: &SkillGraph, state: &SkillTreeState) -> Vec<String> {
    collect_rewards(graph, state, |node| &node.rewards.badges)
}

/// Features granted by completed nodes, in declaration order, without
/// duplicates.
pub fn node_unlocked_features(graph: &SkillGraph, state: &SkillTreeState) -> Vec<String> {
    collect_rewards(graph, state, |node| &node.rewards.unlocked_features)
}

fn collect_rewards<F>(graph: &SkillGraph, state: &SkillTreeState, pick: F) -> Vec<String>
where
    F: Fn(&lexis_graph::SkillNode) -> &Vec<String>,
{
    let mut out: Vec<String> = Vec::new();
    for node in graph.nodes().iter().filter(|n| state.completed_nodes.contains(&n.id)) {
        for item in pick(node) {
            if !out.contains(item) {
                out.push(item.clone());
            }
        }
    }
    out
}
