//! The progression engine: one graph, one progress store, one catalogue.

use crate::config::EngineConfig;
use crate::error::Result;
use lexis_gates::{AccountStats, Feature, FeatureGate, FeatureProgress};
use lexis_graph::{default_graph, NodeId, SkillGraph, SkillNode};
use lexis_progress::{JsonFileBackend, KeyValueBackend, NodeProgress, ProgressStore, SessionReport};
use lexis_unlock::{
    FirstRunPolicy, NodeStatus, Resolver, SkillTreeState, UnlockNotifier,
    DEFAULT_RECOMMENDATION_LIMIT,
};
use std::path::Path;

/// Owns the static definitions and the store, and answers every query the
/// session, UI and notification hosts make.
///
/// Derived state is never cached: each query resolves fresh from the stored
/// progress.
pub struct ProgressionEngine<B> {
    graph: SkillGraph,
    gate: FeatureGate,
    store: ProgressStore<B>,
    resolver: Resolver,
    notifier: UnlockNotifier,
    recommendation_limit: usize,
}

impl ProgressionEngine<JsonFileBackend> {
    /// Open an engine over `config.data_dir`, loading the graph and
    /// catalogue from the configured files or the built-in defaults.
    pub fn open(config: &EngineConfig) -> Result<Self> {
        let graph = match &config.graph_path {
            Some(path) => load_graph(path)?,
            None => default_graph()?,
        };
        let gate = match &config.features_path {
            Some(path) => load_features(path)?,
            None => FeatureGate::default(),
        };
        let backend = JsonFileBackend::open(&config.data_dir)?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            nodes = graph.len(),
            features = gate.features().len(),
            "progression engine opened"
        );
        Ok(Self::new(graph, backend).with_feature_gate(gate).configure(config))
    }
}

impl<B: KeyValueBackend> ProgressionEngine<B> {
    /// Engine over a validated graph with default settings and the
    /// built-in feature catalogue.
    pub fn new(graph: SkillGraph, backend: B) -> Self {
        Self {
            graph,
            gate: FeatureGate::default(),
            store: ProgressStore::new(backend),
            resolver: Resolver::default(),
            notifier: UnlockNotifier::default(),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Apply thresholds, limits and policy from `config`.
    ///
    /// Paths in `config` are ignored here; see [`ProgressionEngine::open`].
    pub fn configure(mut self, config: &EngineConfig) -> Self {
        self.resolver = Resolver::new(config.completion_threshold);
        self.notifier = UnlockNotifier::new(config.first_run);
        self.recommendation_limit = config.recommendation_limit;
        self
    }

    /// Builder: replace the feature catalogue.
    pub fn with_feature_gate(mut self, gate: FeatureGate) -> Self {
        self.gate = gate;
        self
    }

    /// Builder: set the first-run policy of the notifier.
    pub fn with_first_run(mut self, policy: FirstRunPolicy) -> Self {
        self.notifier = UnlockNotifier::new(policy);
        self
    }

    /// The validated skill graph.
    pub fn graph(&self) -> &SkillGraph {
        &self.graph
    }

    /// The feature catalogue.
    pub fn feature_gate(&self) -> &FeatureGate {
        &self.gate
    }

    /// The underlying progress store.
    pub fn store(&self) -> &ProgressStore<B> {
        &self.store
    }

    // ---- Session collaborator ----

    /// Record a finished session.
    ///
    /// Returns the stored record, or `None` when `node_id` is not in the
    /// graph (the report is dropped with a warning). Fails only if the
    /// progress write fails.
    pub fn report_session(
        &mut self,
        node_id: &str,
        correct: u32,
        total: u32,
        time_spent_minutes: u32,
    ) -> Result<Option<NodeProgress>> {
        if !self.graph.contains(node_id) {
            tracing::warn!(node = node_id, "session reported for unknown node, ignoring");
            return Ok(None);
        }

        let report = SessionReport::new(node_id, correct, total, time_spent_minutes);
        let record = self.store.update_node_progress(&report)?;
        tracing::info!(
            node = node_id,
            mastery = record.mastery_level,
            minutes = time_spent_minutes,
            "session recorded"
        );
        Ok(Some(record))
    }

    /// Stored record for a node, if attempted.
    pub fn node_progress(&self, id: &str) -> Option<NodeProgress> {
        self.store.node_progress(id)
    }

    /// Forget all progress and the unlock snapshot.
    ///
    /// The snapshot goes first. A failure after that leaves progress intact
    /// and no snapshot, so the first-run policy decides the next delta.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_previous_unlocked()?;
        self.store.reset_progress()?;
        Ok(())
    }

    // ---- UI collaborator ----

    /// Derive the full tree state from stored progress.
    pub fn skill_tree_state(&self) -> SkillTreeState {
        self.resolver.resolve(&self.graph, &self.store.get_progress())
    }

    /// Next nodes to study; `None` uses the configured limit.
    pub fn recommend_next(&self, limit: Option<usize>) -> Vec<SkillNode> {
        let state = self.skill_tree_state();
        lexis_unlock::recommend_next(
            &state,
            &self.graph,
            limit.unwrap_or(self.recommendation_limit),
        )
        .into_iter()
        .cloned()
        .collect()
    }

    /// Completed share of the graph, 0-100.
    pub fn completion_percentage(&self) -> u8 {
        lexis_unlock::completion_percentage(&self.skill_tree_state(), &self.graph)
    }

    /// Lifecycle status of a node; `None` if the graph lacks it.
    pub fn node_status(&self, id: &str) -> Option<NodeStatus> {
        lexis_unlock::node_status(&self.graph, &self.skill_tree_state(), id)
    }

    /// Whether every prerequisite of `id` meets its mastery requirement.
    pub fn is_node_unlockable(&self, id: &str) -> bool {
        lexis_unlock::is_node_unlockable(&self.graph, &self.store.get_progress(), id)
    }

    /// Badges earned from completed nodes.
    pub fn earned_badges(&self) -> Vec<String> {
        lexis_unlock::earned_badges(&self.graph, &self.skill_tree_state())
    }

    /// Features granted by completed nodes.
    pub fn node_unlocked_features(&self) -> Vec<String> {
        lexis_unlock::node_unlocked_features(&self.graph, &self.skill_tree_state())
    }

    /// Whether `feature_id` is unlocked for `stats`. Unknown ids are locked.
    pub fn is_feature_unlocked(&self, feature_id: &str, stats: &AccountStats) -> bool {
        self.gate.is_feature_unlocked(feature_id, stats)
    }

    /// Unlocked features in catalogue order.
    pub fn available_features(&self, stats: &AccountStats) -> Vec<&Feature> {
        self.gate.available_features(stats)
    }

    /// Up to five locked features, most approachable first.
    pub fn next_unlockable_features(&self, stats: &AccountStats) -> Vec<&Feature> {
        self.gate.next_unlockable_features(stats)
    }

    /// Progress toward a feature; `None` for an unknown id.
    pub fn feature_progress(&self, feature_id: &str, stats: &AccountStats) -> Option<FeatureProgress> {
        self.gate.feature_progress(feature_id, stats)
    }

    // ---- Notification collaborator ----

    /// Nodes unlocked since the last call.
    ///
    /// If the snapshot cannot be written the failure is logged and nothing
    /// is reported; the same delta comes back on the next successful call.
    pub fn check_for_new_unlocks(&mut self) -> Vec<NodeId> {
        let state = self.skill_tree_state();
        match self.notifier.check(&mut self.store, &state.unlocked_nodes) {
            Ok(delta) => delta,
            Err(e) => {
                tracing::warn!(error = %e, "failed to store unlock snapshot");
                Vec::new()
            }
        }
    }
}

/// Load and validate a skill graph file.
pub fn load_graph(path: &Path) -> Result<SkillGraph> {
    let json = std::fs::read_to_string(path)?;
    Ok(SkillGraph::from_json_str(&json)?)
}

/// Load a feature catalogue file.
pub fn load_features(path: &Path) -> Result<FeatureGate> {
    let json = std::fs::read_to_string(path)?;
    Ok(FeatureGate::from_json_str(&json)?)
}
