//! Per-node mastery records and session maths.

use lexis_graph::{NodeId, MAX_MASTERY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Progress for every attempted node.
///
/// A node missing from the map has never been attempted, which is distinct
/// from a node attempted below its threshold.
pub type ProgressMap = BTreeMap<NodeId, NodeProgress>;

/// One learning session, as reported by the quiz collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub node_id: NodeId,
    pub correct: u32,
    pub total: u32,
    pub time_spent_minutes: u32,
}

impl SessionReport {
    /// Create a report.
    pub fn new(
        node_id: impl Into<NodeId>,
        correct: u32,
        total: u32,
        time_spent_minutes: u32,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            correct,
            total,
            time_spent_minutes,
        }
    }

    /// Mastery this session earns.
    pub fn mastery_level(&self) -> u8 {
        mastery_level(self.correct, self.total)
    }
}

/// Mastery for a node, from its most recent session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProgress {
    pub node_id: NodeId,

    /// 0-100, result of the latest session (not an average)
    pub mastery_level: u8,

    pub completed_problems: u32,
    pub total_problems: u32,

    /// Unix milliseconds
    pub last_studied: u64,

    pub average_score: u8,

    /// Minutes
    pub time_spent: u32,
}

impl NodeProgress {
    /// Build the record a session report produces.
    ///
    /// The record replaces any earlier one for the node.
    pub fn from_session(report: &SessionReport, now_ms: u64) -> Self {
        let mastery = report.mastery_level();
        Self {
            node_id: report.node_id.clone(),
            mastery_level: mastery,
            completed_problems: report.total,
            total_problems: report.total,
            last_studied: now_ms,
            average_score: mastery,
            time_spent: report.time_spent_minutes,
        }
    }
}

/// `round(correct / total * 100)`, clamped to 0..=100.
///
/// An empty session (`total == 0`) scores zero.
pub fn mastery_level(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = f64::from(correct.min(total)) / f64::from(total);
    (ratio * f64::from(MAX_MASTERY)).round() as u8
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
