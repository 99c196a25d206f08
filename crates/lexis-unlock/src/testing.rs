//! Shared fixtures for unit tests.

use lexis_graph::{NodeId, SkillGraph, SkillNode};
use lexis_progress::{NodeProgress, SessionReport};
use std::collections::BTreeSet;

/// A (root) -> B -> C, plus an independent root D.
pub(crate) fn scenario_graph() -> SkillGraph {
    SkillGraph::new(vec![
        SkillNode::new("A", "A", "basics", 1)
            .with_unlock("B")
            .with_mastery_requirement(80)
            .with_experience(100),
        SkillNode::new("B", "B", "basics", 2)
            .with_prerequisite("A")
            .with_unlock("C")
            .with_mastery_requirement(80)
            .with_experience(200),
        SkillNode::new("C", "C", "grammar", 3)
            .with_prerequisite("B")
            .with_mastery_requirement(95)
            .with_experience(300),
        SkillNode::new("D", "D", "speaking", 1)
            .with_mastery_requirement(90)
            .with_experience(50),
    ])
    .unwrap()
}

pub(crate) fn record(id: &str, correct: u32, total: u32) -> (NodeId, NodeProgress) {
    let record = NodeProgress::from_session(&SessionReport::new(id, correct, total, 1), 0);
    (record.node_id.clone(), record)
}

pub(crate) fn ids(list: &[&str]) -> BTreeSet<NodeId> {
    list.iter().map(|s| NodeId::from(*s)).collect()
}
