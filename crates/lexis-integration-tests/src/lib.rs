//! Shared fixtures for the cross-crate tests in `tests/`.
//!
//! The scenario graph:
//!
//! ```text
//! A (L1, req 80, 100xp) -> B (L2, req 80, 200xp) -> C (L3, req 95, 300xp)
//! D (L1, req 90, 50xp)
//! ```

use lexis_engine::ProgressionEngine;
use lexis_gates::{Condition, Feature, FeatureGate, Result as GateResult};
use lexis_graph::{Result as GraphResult, SkillGraph, SkillNode};
use lexis_progress::MemoryBackend;

/// Four-node graph used by the scenario tests.
pub fn scenario_graph() -> GraphResult<SkillGraph> {
    SkillGraph::new(vec![
        SkillNode::new("A", "Node A", "core", 1)
            .with_mastery_requirement(80)
            .with_experience(100)
            .with_unlock("B"),
        SkillNode::new("B", "Node B", "core", 2)
            .with_mastery_requirement(80)
            .with_experience(200)
            .with_prerequisite("A")
            .with_unlock("C"),
        SkillNode::new("C", "Node C", "core", 3)
            .with_mastery_requirement(95)
            .with_experience(300)
            .with_prerequisite("B"),
        SkillNode::new("D", "Node D", "extra", 1)
            .with_mastery_requirement(90)
            .with_experience(50),
    ])
}

/// Catalogue holding the combined-condition feature `X` and an open one.
pub fn scenario_features() -> GateResult<FeatureGate> {
    FeatureGate::new(vec![
        Feature::new("open", "Always On", Condition::none()),
        Feature::new("X", "Combo", Condition::none().level(2).xp(200).streak(7)),
    ])
}

/// In-memory engine over the scenario graph.
pub fn scenario_engine() -> GraphResult<ProgressionEngine<MemoryBackend>> {
    Ok(ProgressionEngine::new(scenario_graph()?, MemoryBackend::new()))
}
