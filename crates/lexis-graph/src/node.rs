//! Skill node definitions.
//!
//! Nodes are fixed when the graph is loaded. Nothing in the engine creates
//! or deletes them at runtime.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a skill node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Display position. The engine never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// What completing a node grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    /// Experience added to the account total while the node stays completed
    pub experience: u64,

    /// Badge identifiers
    #[serde(default)]
    pub badges: Vec<String>,

    /// Feature identifiers surfaced to the host
    #[serde(default)]
    pub unlocked_features: Vec<String>,
}

/// A unit of learnable content in the skill graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    /// Unique identifier
    pub id: NodeId,

    /// Human-readable name
    pub name: String,

    /// Grouping used by category views
    pub category: String,

    /// Topological depth tier (strictly above every prerequisite)
    pub level: u32,

    #[serde(default)]
    pub position: Position,

    /// Nodes that must be mastered first
    #[serde(default)]
    pub prerequisites: Vec<NodeId>,

    /// Reverse edges of `prerequisites`
    #[serde(default)]
    pub unlocks: Vec<NodeId>,

    /// Mastery (0-100) this node needs before its dependents unlock
    pub mastery_requirement: u8,

    /// Estimated study time in minutes
    #[serde(default)]
    pub estimated_time: u32,

    #[serde(default)]
    pub rewards: Rewards,
}

impl SkillNode {
    /// Create a node with no edges and no rewards.
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        category: impl Into<String>,
        level: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            level,
            position: Position::default(),
            prerequisites: Vec::new(),
            unlocks: Vec::new(),
            mastery_requirement: 80,
            estimated_time: 0,
            rewards: Rewards::default(),
        }
    }

    /// Builder: add a prerequisite.
    pub fn with_prerequisite(mut self, id: impl Into<NodeId>) -> Self {
        self.prerequisites.push(id.into());
        self
    }

    /// Builder: add an unlock edge.
    pub fn with_unlock(mut self, id: impl Into<NodeId>) -> Self {
        self.unlocks.push(id.into());
        self
    }

    /// Builder: set the mastery requirement.
    pub fn with_mastery_requirement(mut self, requirement: u8) -> Self {
        self.mastery_requirement = requirement;
        self
    }

    /// Builder: set the experience reward.
    pub fn with_experience(mut self, experience: u64) -> Self {
        self.rewards.experience = experience;
        self
    }

    /// Builder: add a badge reward.
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.rewards.badges.push(badge.into());
        self
    }

    /// Builder: add a feature reward.
    pub fn with_unlocked_feature(mut self, feature: impl Into<String>) -> Self {
        self.rewards.unlocked_features.push(feature.into());
        self
    }

    /// Builder: set the estimated time in minutes.
    pub fn with_estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = minutes;
        self
    }

    /// Builder: set the display position.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position { x, y };
        self
    }

    /// True if the node has no prerequisites.
    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }
}
