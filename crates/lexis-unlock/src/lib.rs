//! Lexis Unlock Engine
//!
//! Turns a validated [`SkillGraph`](lexis_graph::SkillGraph) and a progress
//! snapshot into derived progression state.
//!
//! # Components
//!
//! - **Resolver**: pure `(graph, progress) -> SkillTreeState`. Unlocking uses
//!   each prerequisite's own `mastery_requirement`; completion uses a single
//!   separate threshold (default 90).
//! - **Ranker**: the next few available nodes, lowest level first.
//! - **Notifier**: newly unlocked nodes since the last stored snapshot,
//!   each reported once.
//!
//! # Invariants
//!
//! - roots are always unlocked
//! - `completed ⊆ unlocked`
//! - `available = unlocked − completed`
//! - `total_xp` is recomputed from the completed set on every call

mod notifier;
mod ranker;
mod resolver;
mod status;

#[cfg(test)]
mod testing;

pub use notifier::{diff_unlocks, FirstRunPolicy, UnlockNotifier};
pub use ranker::{recommend_next, DEFAULT_RECOMMENDATION_LIMIT};
pub use resolver::{
    completion_percentage, is_node_unlockable, prerequisites_met, Resolver, SkillTreeState,
    BASE_LEVEL, DEFAULT_COMPLETION_THRESHOLD,
};
pub use status::{earned_badges, node_status, node_unlocked_features, NodeStatus};
