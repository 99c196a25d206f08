//! Feature gate evaluation over a catalogue.
//!
//! # Next-Unlock Ordering
//!
//! Locked features are ordered by an explicit tiered key rather than a
//! blended score:
//!
//! ```text
//! (no level?, level, no xp?, xp, no streak?, streak, no achievement?)
//! ```
//!
//! Level-gated features come first, then xp-gated, then streak-gated, then
//! achievement-gated; each tier ascends by its threshold. Ties keep
//! catalogue order.

use crate::error::{GateError, Result};
use crate::feature::{AccountStats, Condition, Feature};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of entries `next_unlockable_features` returns.
pub const NEXT_UNLOCKABLE_LIMIT: usize = 5;

/// Tiered ordering key for locked features.
///
/// Field order is the comparison order. `false < true`, so a present key
/// (`*_absent == false`) sorts ahead of an absent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    level_absent: bool,
    level: i64,
    xp_absent: bool,
    xp: i64,
    streak_absent: bool,
    streak: i64,
    achievement_absent: bool,
}

impl PriorityKey {
    /// Key for a condition.
    pub fn of(condition: &Condition) -> Self {
        Self {
            level_absent: condition.level.is_none(),
            level: condition.level.unwrap_or(0),
            xp_absent: condition.xp.is_none(),
            xp: condition.xp.unwrap_or(0),
            streak_absent: condition.streak.is_none(),
            streak: condition.streak.unwrap_or(0),
            achievement_absent: condition.achievement.is_none(),
        }
    }
}

/// The first unmet requirement of a locked feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    Level { required: i64, current: i64 },
    Xp { required: i64, current: i64 },
    Streak { required: i64, current: i64 },
    Achievement { id: String },
}

/// How close an account is to a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProgress {
    pub is_unlocked: bool,
    /// 0-100
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_requirement: Option<Requirement>,
}

/// A feature catalogue and the gate rules over it.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    features: Vec<Feature>,
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self {
            features: crate::catalogue::default_features(),
        }
    }
}

impl FeatureGate {
    /// Build a gate over `features`, rejecting duplicate ids.
    pub fn new(features: Vec<Feature>) -> Result<Self> {
        let mut seen = HashSet::new();
        for feature in &features {
            if !seen.insert(feature.id.as_str()) {
                return Err(GateError::DuplicateFeature(feature.id.clone()));
            }
        }
        Ok(Self { features })
    }

    /// Parse a JSON array of features.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    /// The full catalogue in declaration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Look up a feature.
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Whether `id` is unlocked for `stats`. Unknown ids are locked.
    pub fn is_feature_unlocked(&self, id: &str, stats: &AccountStats) -> bool {
        match self.get(id) {
            Some(feature) => feature.condition.is_met(stats),
            None => {
                tracing::debug!(feature = id, "unknown feature probed");
                false
            }
        }
    }

    /// Every unlocked feature, in catalogue order.
    pub fn available_features(&self, stats: &AccountStats) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| f.condition.is_met(stats))
            .collect()
    }

    /// Locked features, most approachable tier first, at most five.
    pub fn next_unlockable_features(&self, stats: &AccountStats) -> Vec<&Feature> {
        let mut locked: Vec<&Feature> = self
            .features
            .iter()
            .filter(|f| !f.condition.is_met(stats))
            .collect();
        locked.sort_by_key(|f| PriorityKey::of(&f.condition));
        locked.truncate(NEXT_UNLOCKABLE_LIMIT);
        locked
    }

    /// Progress toward `id`, or `None` for an unknown feature.
    ///
    /// Progress is the rounded mean of per-key ratios: numeric keys count
    /// `value / threshold` clamped to 0..=1 (a threshold of zero or less
    /// counts 0 or 1), an achievement counts 0 or 1. An empty condition is
    /// 100%.
    pub fn feature_progress(&self, id: &str, stats: &AccountStats) -> Option<FeatureProgress> {
        let condition = &self.get(id)?.condition;

        let mut ratios: Vec<f64> = Vec::with_capacity(4);
        if let Some(required) = condition.level {
            ratios.push(ratio(stats.level, required));
        }
        if let Some(required) = condition.xp {
            ratios.push(ratio(stats.xp, required));
        }
        if let Some(required) = condition.streak {
            ratios.push(ratio(stats.streak, required));
        }
        if let Some(achievement) = &condition.achievement {
            ratios.push(if stats.has_achievement(achievement) { 1.0 } else { 0.0 });
        }

        let progress = if ratios.is_empty() {
            100
        } else {
            let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
            (mean * 100.0).round() as u8
        };

        Some(FeatureProgress {
            is_unlocked: condition.is_met(stats),
            progress,
            next_requirement: next_requirement(condition, stats),
        })
    }
}

fn ratio(value: i64, required: i64) -> f64 {
    if required <= 0 {
        return if value >= required { 1.0 } else { 0.0 };
    }
    (value as f64 / required as f64).clamp(0.0, 1.0)
}

fn next_requirement(condition: &Condition, stats: &AccountStats) -> Option<Requirement> {
    if let Some(required) = condition.level.filter(|&r| stats.level < r) {
        return Some(Requirement::Level {
            required,
            current: stats.level,
        });
    }
    if let Some(required) = condition.xp.filter(|&r| stats.xp < r) {
        return Some(Requirement::Xp {
            required,
            current: stats.xp,
        });
    }
    if let Some(required) = condition.streak.filter(|&r| stats.streak < r) {
        return Some(Requirement::Streak {
            required,
            current: stats.streak,
        });
    }
    condition
        .achievement
        .as_ref()
        .filter(|a| !stats.has_achievement(a))
        .map(|a| Requirement::Achievement { id: a.clone() })
}
