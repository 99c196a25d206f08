//! End-to-end scenarios through the engine facade.

use lexis_engine::ProgressionEngine;
use lexis_gates::AccountStats;
use lexis_graph::NodeId;
use lexis_integration_tests::{scenario_engine, scenario_features, scenario_graph};
use lexis_progress::MemoryBackend;
use lexis_unlock::{FirstRunPolicy, NodeStatus};

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

#[test]
fn scenario_a_partial_mastery_unlocks_but_does_not_complete() {
    let mut engine = scenario_engine().unwrap();

    let record = engine.report_session("A", 8, 10, 5).unwrap().unwrap();
    assert_eq!(record.mastery_level, 80);

    let state = engine.skill_tree_state();
    assert!(state.unlocked_nodes.contains(&id("A")));
    assert!(state.available_nodes.contains(&id("A")));
    assert!(!state.completed_nodes.contains(&id("A")));
    assert_eq!(engine.node_status("A"), Some(NodeStatus::InProgress));
}

#[test]
fn scenario_b_prerequisite_at_requirement_unlocks_dependent() {
    let mut engine = scenario_engine().unwrap();
    assert!(!engine.skill_tree_state().is_unlocked("B"));

    engine.report_session("A", 8, 10, 5).unwrap();

    let state = engine.skill_tree_state();
    assert!(state.is_unlocked("B"));
    assert!(state.is_available("B"));
    assert!(!state.is_unlocked("C"));
    assert_eq!(engine.node_status("B"), Some(NodeStatus::Available));
}

#[test]
fn scenario_c_poor_session_regresses_completed_node() {
    let mut engine = scenario_engine().unwrap();

    engine.report_session("A", 19, 20, 10).unwrap();
    let state = engine.skill_tree_state();
    assert!(state.is_completed("A"));
    assert_eq!(state.total_xp, 100);

    // Sessions overwrite: the later score replaces the earlier one.
    let record = engine.report_session("A", 3, 10, 2).unwrap().unwrap();
    assert_eq!(record.mastery_level, 30);

    let state = engine.skill_tree_state();
    assert!(!state.is_completed("A"));
    assert!(state.is_available("A"));
    assert_eq!(state.total_xp, 0);
    // B relocks because A fell below its requirement.
    assert!(!state.is_unlocked("B"));
    assert_eq!(engine.node_status("A"), Some(NodeStatus::InProgress));
}

#[test]
fn scenario_d_every_condition_key_must_hold() {
    let engine = scenario_engine().unwrap().with_feature_gate(scenario_features().unwrap());

    assert!(!engine.is_feature_unlocked("X", &AccountStats::new(2, 200, 6)));
    assert!(engine.is_feature_unlocked("X", &AccountStats::new(2, 200, 7)));

    let progress = engine
        .feature_progress("X", &AccountStats::new(2, 200, 6))
        .unwrap();
    assert!(!progress.is_unlocked);
    assert!(progress.progress < 100);
}

#[test]
fn scenario_e_unlock_delta_is_consumed() {
    let mut engine = scenario_engine().unwrap();
    assert!(engine.check_for_new_unlocks().is_empty());

    engine.report_session("A", 8, 10, 5).unwrap();

    assert_eq!(engine.check_for_new_unlocks(), vec![id("B")]);
    assert!(engine.check_for_new_unlocks().is_empty());
}

#[test]
fn scenario_e_report_all_on_first_run() {
    let mut engine = ProgressionEngine::new(scenario_graph().unwrap(), MemoryBackend::new())
        .with_first_run(FirstRunPolicy::ReportAll);

    assert_eq!(engine.check_for_new_unlocks(), vec![id("A"), id("D")]);
    assert!(engine.check_for_new_unlocks().is_empty());
}

#[test]
fn full_walk_through_scenario_graph() {
    let mut engine = scenario_engine().unwrap();

    for node in ["A", "B", "D"] {
        engine.report_session(node, 10, 10, 5).unwrap();
    }
    assert_eq!(engine.recommend_next(None).iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), vec!["C"]);

    // C needs 95 to count as mastered for dependents, but completes at 90.
    engine.report_session("C", 9, 10, 5).unwrap();
    let state = engine.skill_tree_state();
    assert_eq!(state.completed_nodes.len(), 4);
    assert_eq!(state.total_xp, 650);
    assert_eq!(state.current_level, 3);
    assert_eq!(engine.completion_percentage(), 100);
    assert!(engine.recommend_next(None).is_empty());
}
