//! The progress store: durable CRUD over node mastery records.
//!
//! Two independent records live in the backend:
//!
//! - `progress`: map of node id to [`NodeProgress`]
//! - `previous_unlocked`: the unlock-delta snapshot
//!
//! Reads are fail-soft. An absent or unparsable record yields the empty
//! default and a warning, never an error, so derivation can always run.
//! Writes return `Result` so the host can observe a failed disk write.

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::record::{now_millis, NodeProgress, ProgressMap, SessionReport};
use lexis_graph::NodeId;
use std::collections::BTreeSet;

/// Backend key for the progress map.
pub const PROGRESS_KEY: &str = "progress";

/// Backend key for the unlock-delta snapshot.
pub const SNAPSHOT_KEY: &str = "previous_unlocked";

/// Progress store over a key-value backend.
///
/// Assumes a single writer. Two hosts sharing one backend lose updates
/// (last write wins); nothing here locks.
#[derive(Debug, Default)]
pub struct ProgressStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> ProgressStore<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All progress records. Empty if none exist or the blob is corrupt.
    pub fn get_progress(&self) -> ProgressMap {
        self.read_or_default(PROGRESS_KEY)
    }

    /// Record for a single node, if attempted.
    pub fn node_progress(&self, id: &str) -> Option<NodeProgress> {
        self.get_progress().remove(id)
    }

    /// Record a session, stamped with the current time.
    pub fn update_node_progress(&mut self, report: &SessionReport) -> Result<NodeProgress> {
        self.update_node_progress_at(report, now_millis())
    }

    /// Record a session with an explicit timestamp.
    ///
    /// Overwrites (never merges) the node's record, then persists the full
    /// map back to the backend.
    pub fn update_node_progress_at(
        &mut self,
        report: &SessionReport,
        now_ms: u64,
    ) -> Result<NodeProgress> {
        if report.total == 0 {
            tracing::warn!(
                node = %report.node_id,
                "session reported with zero problems, recording mastery 0"
            );
        }

        let record = NodeProgress::from_session(report, now_ms);
        let mut progress = self.get_progress();
        progress.insert(record.node_id.clone(), record.clone());

        let data = serde_json::to_vec(&progress)?;
        self.backend.put(PROGRESS_KEY, &data)?;

        tracing::debug!(
            node = %record.node_id,
            mastery = record.mastery_level,
            "progress recorded"
        );
        Ok(record)
    }

    /// Clear every progress record.
    pub fn reset_progress(&mut self) -> Result<()> {
        self.backend.delete(PROGRESS_KEY)?;
        tracing::info!("progress reset");
        Ok(())
    }

    /// The stored unlock snapshot.
    ///
    /// `None` when no snapshot has ever been written. A corrupt snapshot
    /// reads as empty.
    pub fn previous_unlocked(&self) -> Option<BTreeSet<NodeId>> {
        match self.backend.get(SNAPSHOT_KEY) {
            Ok(Some(data)) => Some(parse_or_default(SNAPSHOT_KEY, &data)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = SNAPSHOT_KEY, error = %e, "snapshot read failed, treating as empty");
                Some(BTreeSet::new())
            }
        }
    }

    /// Replace the unlock snapshot.
    pub fn set_previous_unlocked(&mut self, ids: &BTreeSet<NodeId>) -> Result<()> {
        let data = serde_json::to_vec(ids)?;
        self.backend.put(SNAPSHOT_KEY, &data)
    }

    /// Forget the unlock snapshot.
    pub fn clear_previous_unlocked(&mut self) -> Result<()> {
        self.backend.delete(SNAPSHOT_KEY)
    }

    fn read_or_default<T: serde::de::DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.backend.get(key) {
            Ok(Some(data)) => parse_or_default(key, &data),
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using empty default");
                T::default()
            }
        }
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(key: &str, data: &[u8]) -> T {
    serde_json::from_slice(data).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "stored record is malformed, using empty default");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonFileBackend, MemoryBackend};
    use crate::error::StoreError;
    use tempfile::tempdir;

    fn store() -> ProgressStore<MemoryBackend> {
        ProgressStore::new(MemoryBackend::new())
    }

    #[test]
    fn empty_store_has_no_progress() {
        assert!(store().get_progress().is_empty());
    }

    #[test]
    fn update_records_mastery() {
        let mut store = store();
        let record = store
            .update_node_progress_at(&SessionReport::new("alphabet", 8, 10, 5), 42)
            .unwrap();
        assert_eq!(record.mastery_level, 80);

        let progress = store.get_progress();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress["alphabet"], record);
    }

    #[test]
    fn update_overwrites_not_merges() {
        let mut store = store();
        store.update_node_progress_at(&SessionReport::new("a", 19, 20, 10), 1).unwrap();
        store.update_node_progress_at(&SessionReport::new("a", 3, 10, 2), 2).unwrap();

        let record = store.node_progress("a").unwrap();
        assert_eq!(record.mastery_level, 30);
        assert_eq!(record.total_problems, 10);
        assert_eq!(record.time_spent, 2);
        assert_eq!(record.last_studied, 2);
    }

    #[test]
    fn updates_to_other_nodes_are_kept() {
        let mut store = store();
        store.update_node_progress(&SessionReport::new("a", 1, 1, 1)).unwrap();
        store.update_node_progress(&SessionReport::new("b", 1, 2, 1)).unwrap();
        assert_eq!(store.get_progress().len(), 2);
        assert!(store.node_progress("c").is_none());
    }

    #[test]
    fn corrupt_progress_reads_empty() {
        let mut backend = MemoryBackend::new();
        backend.put(PROGRESS_KEY, b"{not json").unwrap();
        let mut store = ProgressStore::new(backend);

        assert!(store.get_progress().is_empty());

        // A later write replaces the corrupt blob.
        store.update_node_progress(&SessionReport::new("a", 1, 1, 1)).unwrap();
        assert_eq!(store.get_progress().len(), 1);
    }

    #[test]
    fn reset_clears_records() {
        let mut store = store();
        store.update_node_progress(&SessionReport::new("a", 1, 1, 1)).unwrap();
        store.reset_progress().unwrap();
        assert!(store.get_progress().is_empty());
    }

    #[test]
    fn snapshot_absent_vs_empty() {
        let mut store = store();
        assert!(store.previous_unlocked().is_none());

        store.set_previous_unlocked(&BTreeSet::new()).unwrap();
        assert_eq!(store.previous_unlocked(), Some(BTreeSet::new()));

        let ids: BTreeSet<NodeId> = ["a", "b"].into_iter().map(NodeId::from).collect();
        store.set_previous_unlocked(&ids).unwrap();
        assert_eq!(store.previous_unlocked(), Some(ids));

        store.clear_previous_unlocked().unwrap();
        assert!(store.previous_unlocked().is_none());
    }

    #[test]
    fn corrupt_snapshot_reads_empty() {
        let mut backend = MemoryBackend::new();
        backend.put(SNAPSHOT_KEY, b"42").unwrap();
        let store = ProgressStore::new(backend);
        assert_eq!(store.previous_unlocked(), Some(BTreeSet::new()));
    }

    #[test]
    fn snapshot_independent_of_progress_reset() {
        let mut store = store();
        let ids: BTreeSet<NodeId> = [NodeId::from("a")].into_iter().collect();
        store.set_previous_unlocked(&ids).unwrap();
        store.reset_progress().unwrap();
        assert_eq!(store.previous_unlocked(), Some(ids));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempdir().unwrap();
        {
            let mut store = ProgressStore::new(JsonFileBackend::open(dir.path()).unwrap());
            store.update_node_progress(&SessionReport::new("greetings", 9, 10, 12)).unwrap();
        }

        let store = ProgressStore::new(JsonFileBackend::open(dir.path()).unwrap());
        assert_eq!(store.node_progress("greetings").unwrap().mastery_level, 90);
    }

    struct FailingBackend;

    impl KeyValueBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(StoreError::Backend("disk on fire".into()))
        }

        fn put(&mut self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(StoreError::Backend("disk on fire".into()))
        }

        fn delete(&mut self, _key: &str) -> Result<()> {
            Err(StoreError::Backend("disk on fire".into()))
        }
    }

    #[test]
    fn failing_backend_reads_soft_writes_hard() {
        let mut store = ProgressStore::new(FailingBackend);
        assert!(store.get_progress().is_empty());
        assert_eq!(store.previous_unlocked(), Some(BTreeSet::new()));
        assert!(store.update_node_progress(&SessionReport::new("a", 1, 1, 1)).is_err());
        assert!(store.reset_progress().is_err());
    }
}
