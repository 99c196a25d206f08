//! Engine behaviour over the file backend: restarts, corrupt records and
//! configured definitions.

use lexis_engine::{EngineConfig, EngineError, ProgressionEngine};
use lexis_gates::AccountStats;
use lexis_graph::NodeId;
use lexis_unlock::{FirstRunPolicy, NodeStatus};

#[test]
fn progress_and_snapshot_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::new(dir.path());

    {
        let mut engine = ProgressionEngine::open(&config).unwrap();
        engine.check_for_new_unlocks();
        engine.report_session("alphabet", 9, 10, 7).unwrap();
    }

    let mut engine = ProgressionEngine::open(&config).unwrap();
    assert_eq!(engine.node_status("alphabet"), Some(NodeStatus::Completed));
    assert_eq!(engine.node_progress("alphabet").unwrap().time_spent, 7);
    assert_eq!(
        engine.check_for_new_unlocks(),
        vec![NodeId::from("greetings"), NodeId::from("numbers")]
    );

    let mut engine = ProgressionEngine::open(&config).unwrap();
    assert!(engine.check_for_new_unlocks().is_empty());
}

#[test]
fn corrupt_records_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("progress.json"), b"{not json").unwrap();
    std::fs::write(dir.path().join("previous_unlocked.json"), b"[1, 2").unwrap();

    let config = EngineConfig::new(dir.path()).with_first_run(FirstRunPolicy::SeedSilently);
    let mut engine = ProgressionEngine::open(&config).unwrap();

    let state = engine.skill_tree_state();
    assert!(state.progress.is_empty());
    assert_eq!(state.unlocked_nodes.len(), 2);

    // A corrupt snapshot counts as an empty one, so both roots are new.
    assert_eq!(
        engine.check_for_new_unlocks(),
        vec![NodeId::from("alphabet"), NodeId::from("pronunciation")]
    );

    // The next write replaces the corrupt blob.
    engine.report_session("alphabet", 10, 10, 3).unwrap();
    assert_eq!(engine.node_status("alphabet"), Some(NodeStatus::Completed));
}

#[test]
fn custom_definitions_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("graph.json");
    let features = dir.path().join("features.json");
    std::fs::write(
        &graph,
        r#"[
            {"id": "kana", "name": "Kana", "category": "script", "level": 1,
             "masteryRequirement": 80, "unlocks": ["kanji"]},
            {"id": "kanji", "name": "Kanji", "category": "script", "level": 2,
             "masteryRequirement": 90, "prerequisites": ["kana"]}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        &features,
        r#"[{"id": "drills", "name": "Drills", "condition": {"streak": 2}}]"#,
    )
    .unwrap();

    let config = EngineConfig::new(dir.path().join("data"))
        .with_graph_path(&graph)
        .with_features_path(&features)
        .with_recommendation_limit(1);
    let mut engine = ProgressionEngine::open(&config).unwrap();

    assert_eq!(engine.graph().len(), 2);
    assert!(engine.is_feature_unlocked("drills", &AccountStats::new(0, 0, 2)));
    assert!(!engine.is_feature_unlocked("flashcards", &AccountStats::new(9, 9, 9)));

    engine.report_session("kana", 4, 5, 10).unwrap();
    let picks = engine.recommend_next(None);
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].id.as_str(), "kana");
}

#[test]
fn cyclic_graph_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("graph.json");
    std::fs::write(
        &graph,
        r#"[
            {"id": "a", "name": "A", "category": "c", "level": 1, "masteryRequirement": 80,
             "prerequisites": ["b"], "unlocks": ["b"]},
            {"id": "b", "name": "B", "category": "c", "level": 2, "masteryRequirement": 80,
             "prerequisites": ["a"], "unlocks": ["a"]}
        ]"#,
    )
    .unwrap();

    let config = EngineConfig::new(dir.path().join("data")).with_graph_path(&graph);
    assert!(matches!(ProgressionEngine::open(&config), Err(EngineError::Graph(_))));
}
