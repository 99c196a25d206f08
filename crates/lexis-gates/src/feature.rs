//! Feature definitions and the account stats they are gated on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Scalar account state a gate is evaluated against.
///
/// Values are signed: callers may pass anything, including negatives, and
/// evaluation never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStats {
    pub level: i64,
    pub xp: i64,
    pub streak: i64,
    /// A missing or `null` collection is treated as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub achievements: BTreeSet<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AccountStats {
    /// Stats with no achievements.
    pub fn new(level: i64, xp: i64, streak: i64) -> Self {
        Self {
            level,
            xp,
            streak,
            achievements: BTreeSet::new(),
        }
    }

    /// Builder: add an achievement.
    pub fn with_achievement(mut self, achievement: impl Into<String>) -> Self {
        self.achievements.insert(achievement.into());
        self
    }

    /// Builder: replace the achievement set. `None` means no achievements.
    pub fn with_achievements<I, S>(mut self, achievements: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievements = achievements
            .map(|list| list.into_iter().map(Into::into).collect())
            .unwrap_or_default();
        self
    }

    /// True if the account holds `achievement`.
    pub fn has_achievement(&self, achievement: &str) -> bool {
        self.achievements.contains(achievement)
    }
}

/// Unlock condition. Absent keys impose no constraint; present keys are
/// AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
}

impl Condition {
    /// The empty condition: always satisfied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder: require a minimum level.
    pub fn level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    /// Builder: require minimum experience.
    pub fn xp(mut self, xp: i64) -> Self {
        self.xp = Some(xp);
        self
    }

    /// Builder: require a minimum streak.
    pub fn streak(mut self, streak: i64) -> Self {
        self.streak = Some(streak);
        self
    }

    /// Builder: require an achievement.
    pub fn achievement(mut self, achievement: impl Into<String>) -> Self {
        self.achievement = Some(achievement.into());
        self
    }

    /// True if no key is present.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.xp.is_none()
            && self.streak.is_none()
            && self.achievement.is_none()
    }

    /// Evaluate against account stats.
    pub fn is_met(&self, stats: &AccountStats) -> bool {
        self.level.map_or(true, |min| stats.level >= min)
            && self.xp.map_or(true, |min| stats.xp >= min)
            && self.streak.map_or(true, |min| stats.streak >= min)
            && self
                .achievement
                .as_deref()
                .map_or(true, |a| stats.has_achievement(a))
    }
}

/// A named feature and the condition that unlocks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub condition: Condition,
}

impl Feature {
    /// Create a feature.
    pub fn new(id: impl Into<String>, name: impl Into<String>, condition: Condition) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            condition,
        }
    }

    /// Builder: add a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
