//! Recommendation ranking over available nodes.

use crate::resolver::SkillTreeState;
use lexis_graph::{SkillGraph, SkillNode};

/// Default number of recommendations surfaced.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Pick the next nodes to study.
///
/// Input is exactly the state's available set. Sorted by ascending level,
/// ties broken by declaration order, then truncated to `limit`. Returns an
/// empty list when nothing is available.
pub fn recommend_next<'g>(
    state: &SkillTreeState,
    graph: &'g SkillGraph,
    limit: usize,
) -> Vec<&'g SkillNode> {
    let mut candidates: Vec<(u32, usize, &SkillNode)> = state
        .available_nodes
        .iter()
        .filter_map(|id| {
            let position = graph.position_of(id.as_str())?;
            let node = graph.get(id.as_str())?;
            Some((node.level, position, node))
        })
        .collect();

    candidates.sort_by_key(|&(level, position, _)| (level, position));
    candidates
        .into_iter()
        .take(limit)
        .map(|(_, _, node)| node)
        .collect()
}
