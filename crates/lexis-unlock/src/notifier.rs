//! Unlock-delta tracking.
//!
//! Compares the current unlocked set against the last persisted snapshot
//! and reports each newly unlocked node once. The snapshot advances on every
//! check, so a node that stays unlocked is never reported twice.

use lexis_graph::NodeId;
use lexis_progress::{KeyValueBackend, ProgressStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// What to do when no snapshot has ever been stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstRunPolicy {
    /// Store the current set without reporting anything
    #[default]
    SeedSilently,
    /// Treat the missing snapshot as empty and report every unlocked node
    ReportAll,
}

impl FromStr for FirstRunPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seed" | "seed_silently" => Ok(Self::SeedSilently),
            "report" | "report_all" => Ok(Self::ReportAll),
            other => Err(format!("unknown first-run policy: {}", other)),
        }
    }
}

/// Ids in `current` but not in `previous`, in id order.
pub fn diff_unlocks(previous: &BTreeSet<NodeId>, current: &BTreeSet<NodeId>) -> Vec<NodeId> {
    current.difference(previous).cloned().collect()
}

/// Persists the unlock snapshot and emits deltas against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockNotifier {
    policy: FirstRunPolicy,
}

impl UnlockNotifier {
    /// Create a notifier.
    pub const fn new(policy: FirstRunPolicy) -> Self {
        Self { policy }
    }

    /// The configured first-run policy.
    pub const fn policy(&self) -> FirstRunPolicy {
        self.policy
    }

    /// Report nodes newly unlocked since the stored snapshot, then store
    /// `current` as the new snapshot.
    ///
    /// A failed snapshot write is propagated. The old snapshot stays in
    /// place, so the same delta is reported again on the next check.
    pub fn check<B: KeyValueBackend>(
        &self,
        store: &mut ProgressStore<B>,
        current: &BTreeSet<NodeId>,
    ) -> Result<Vec<NodeId>, StoreError> {
        let newly_unlocked = match store.previous_unlocked() {
            Some(previous) if &previous == current => return Ok(Vec::new()),
            Some(previous) => diff_unlocks(&previous, current),
            None => match self.policy {
                FirstRunPolicy::SeedSilently => {
                    tracing::debug!(unlocked = current.len(), "seeding unlock snapshot");
                    Vec::new()
                }
                FirstRunPolicy::ReportAll => diff_unlocks(&BTreeSet::new(), current),
            },
        };

        store.set_previous_unlocked(current)?;

        for id in &newly_unlocked {
            tracing::info!(node = %id, "node unlocked");
        }
        Ok(newly_unlocked)
    }
}
