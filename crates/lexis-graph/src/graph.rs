//! The canonical node set and its load-time validation.
//!
//! # Consistency Rules
//!
//! - every id is unique
//! - every prerequisite and unlock target exists
//! - `unlocks` is exactly the inverse of `prerequisites`
//! - the prerequisite relation is acyclic (Kahn's topological sort)
//! - a node's level is strictly greater than each prerequisite's level
//! - mastery requirements lie in 0..=100

use crate::error::{GraphError, Result};
use crate::node::{NodeId, SkillNode};
use std::collections::{HashMap, VecDeque};

/// Highest meaningful mastery value.
pub const MAX_MASTERY: u8 = 100;

/// A validated, immutable skill graph.
///
/// Nodes keep their declaration order, which the ranker uses as its
/// tie-breaker.
#[derive(Debug, Clone)]
pub struct SkillGraph {
    nodes: Vec<SkillNode>,
    index: HashMap<NodeId, usize>,
    topological: Vec<usize>,
}

impl SkillGraph {
    /// Validate `nodes` and build the graph.
    pub fn new(nodes: Vec<SkillNode>) -> Result<Self> {
        let (index, topological) = check(&nodes)?;
        tracing::debug!(nodes = nodes.len(), "skill graph validated");
        Ok(Self {
            nodes,
            index,
            topological,
        })
    }

    /// Parse a JSON array of node definitions and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let nodes: Vec<SkillNode> = serde_json::from_str(json)?;
        Self::new(nodes)
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&SkillNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Declaration position of a node.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// True if the graph defines `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    /// Nodes ordered so every prerequisite precedes its dependents.
    pub fn topological_order(&self) -> impl Iterator<Item = &SkillNode> {
        self.topological.iter().map(|&i| &self.nodes[i])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with no prerequisites.
    pub fn roots(&self) -> impl Iterator<Item = &SkillNode> {
        self.nodes.iter().filter(|n| n.is_root())
    }

    /// Nodes of one category, in declaration order.
    pub fn nodes_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a SkillNode> {
        self.nodes.iter().filter(move |n| n.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if !seen.contains(&node.category.as_str()) {
                seen.push(&node.category);
            }
        }
        seen
    }
}

/// Validate a node set without building a graph.
///
/// Pure; returns the first inconsistency found, scanning in declaration
/// order.
pub fn validate_graph(nodes: &[SkillNode]) -> Result<()> {
    check(nodes).map(|_| ())
}

fn check(nodes: &[SkillNode]) -> Result<(HashMap<NodeId, usize>, Vec<usize>)> {
    let index = build_index(nodes)?;

    for node in nodes {
        if node.mastery_requirement > MAX_MASTERY {
            return Err(GraphError::MasteryRequirementOutOfRange {
                node: node.id.clone(),
                value: node.mastery_requirement,
            });
        }

        for prereq_id in &node.prerequisites {
            let prereq = match index.get(prereq_id) {
                Some(&i) => &nodes[i],
                None => {
                    return Err(GraphError::UnknownPrerequisite {
                        node: node.id.clone(),
                        prerequisite: prereq_id.clone(),
                    })
                }
            };
            if !prereq.unlocks.contains(&node.id) {
                return Err(GraphError::AsymmetricEdge {
                    from: prereq_id.clone(),
                    to: node.id.clone(),
                    missing: "prerequisite has no matching unlocks entry",
                });
            }
        }

        for target_id in &node.unlocks {
            let target = match index.get(target_id) {
                Some(&i) => &nodes[i],
                None => {
                    return Err(GraphError::UnknownUnlockTarget {
                        node: node.id.clone(),
                        target: target_id.clone(),
                    })
                }
            };
            if !target.prerequisites.contains(&node.id) {
                return Err(GraphError::AsymmetricEdge {
                    from: node.id.clone(),
                    to: target_id.clone(),
                    missing: "unlock target has no matching prerequisites entry",
                });
            }
        }
    }

    let order = topological_order(nodes, &index)?;

    // Cycles are ruled out above, so a level violation here is a genuine
    // depth mismatch rather than a symptom of a loop.
    for node in nodes {
        for prereq_id in &node.prerequisites {
            let prereq = &nodes[index[prereq_id]];
            if node.level <= prereq.level {
                return Err(GraphError::LevelOrder {
                    node: node.id.clone(),
                    level: node.level,
                    prerequisite: prereq.id.clone(),
                    prerequisite_level: prereq.level,
                });
            }
        }
    }

    Ok((index, order))
}

fn build_index(nodes: &[SkillNode]) -> Result<HashMap<NodeId, usize>> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id.clone(), i).is_some() {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }
    }
    Ok(index)
}

/// Kahn's algorithm over the prerequisite relation.
///
/// Edges must already be known to exist. Duplicate prerequisite entries
/// count once per occurrence on both sides, so they cancel out.
fn topological_order(nodes: &[SkillNode], index: &HashMap<NodeId, usize>) -> Result<Vec<usize>> {
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.prerequisites.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for prereq_id in &node.prerequisites {
            dependents[index[prereq_id]].push(i);
        }
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() < nodes.len() {
        let remaining = (0..nodes.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].id.clone())
            .collect();
        return Err(GraphError::Cycle { remaining });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain() -> Vec<SkillNode> {
        vec![
            SkillNode::new("a", "A", "basics", 1).with_unlock("b"),
            SkillNode::new("b", "B", "basics", 2).with_prerequisite("a").with_unlock("c"),
            SkillNode::new("c", "C", "grammar", 3).with_prerequisite("b"),
        ]
    }

    #[test]
    fn valid_chain_builds() {
        let graph = SkillGraph::new(chain()).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("b").unwrap().level, 2);
        assert_eq!(graph.position_of("c"), Some(2));
        assert_eq!(graph.roots().count(), 1);
        let order: Vec<&str> = graph.topological_order().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(graph.get("missing").is_none());
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = SkillGraph::new(Vec::new()).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut nodes = chain();
        nodes.push(SkillNode::new("a", "Again", "basics", 1));
        assert!(matches!(validate_graph(&nodes), Err(GraphError::DuplicateNode(id)) if id.as_str() == "a"));
    }

    #[test]
    fn unknown_prerequisite_rejected() {
        let nodes = vec![SkillNode::new("x", "X", "basics", 2).with_prerequisite("ghost")];
        assert!(matches!(
            validate_graph(&nodes),
            Err(GraphError::UnknownPrerequisite { prerequisite, .. }) if prerequisite.as_str() == "ghost"
        ));
    }

    #[test]
    fn unknown_unlock_target_rejected() {
        let nodes = vec![SkillNode::new("x", "X", "basics", 1).with_unlock("ghost")];
        assert!(matches!(
            validate_graph(&nodes),
            Err(GraphError::UnknownUnlockTarget { target, .. }) if target.as_str() == "ghost"
        ));
    }

    #[test]
    fn unreciprocated_unlock_rejected() {
        let nodes = vec![
            SkillNode::new("a", "A", "basics", 1).with_unlock("b"),
            SkillNode::new("b", "B", "basics", 2),
        ];
        assert!(matches!(
            validate_graph(&nodes),
            Err(GraphError::AsymmetricEdge { from, to, .. }) if from.as_str() == "a" && to.as_str() == "b"
        ));
    }

    #[test]
    fn unreciprocated_prerequisite_rejected() {
        let nodes = vec![
            SkillNode::new("a", "A", "basics", 1),
            SkillNode::new("b", "B", "basics", 2).with_prerequisite("a"),
        ];
        assert!(matches!(validate_graph(&nodes), Err(GraphError::AsymmetricEdge { .. })));
    }

    #[test]
    fn cycle_rejected() {
        let nodes = vec![
            SkillNode::new("root", "Root", "basics", 1),
            SkillNode::new("a", "A", "basics", 2).with_prerequisite("b").with_unlock("b"),
            SkillNode::new("b", "B", "basics", 3).with_prerequisite("a").with_unlock("a"),
        ];
        match validate_graph(&nodes) {
            Err(GraphError::Cycle { remaining }) => {
                assert_eq!(remaining, vec![NodeId::from("a"), NodeId::from("b")]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn self_loop_rejected() {
        let nodes = vec![SkillNode::new("a", "A", "basics", 1).with_prerequisite("a").with_unlock("a")];
        assert!(matches!(validate_graph(&nodes), Err(GraphError::Cycle { .. })));
    }

    #[test]
    fn level_must_exceed_prerequisite() {
        let nodes = vec![
            SkillNode::new("a", "A", "basics", 2).with_unlock("b"),
            SkillNode::new("b", "B", "basics", 2).with_prerequisite("a"),
        ];
        assert!(matches!(validate_graph(&nodes), Err(GraphError::LevelOrder { .. })));
    }

    #[test]
    fn mastery_requirement_range_checked() {
        let nodes = vec![SkillNode::new("a", "A", "basics", 1).with_mastery_requirement(101)];
        assert!(matches!(
            validate_graph(&nodes),
            Err(GraphError::MasteryRequirementOutOfRange { value: 101, .. })
        ));
    }

    #[test]
    fn parse_error_is_graph_error() {
        assert!(matches!(SkillGraph::from_json_str("not json"), Err(GraphError::Parse(_))));
    }

    #[test]
    fn loads_json_definition() {
        let json = r#"[
            {"id": "a", "name": "A", "category": "basics", "level": 1, "masteryRequirement": 80, "unlocks": ["b"]},
            {"id": "b", "name": "B", "category": "grammar", "level": 2, "masteryRequirement": 85, "prerequisites": ["a"]}
        ]"#;
        let graph = SkillGraph::from_json_str(json).unwrap();
        assert_eq!(graph.categories(), vec!["basics", "grammar"]);
        assert_eq!(graph.nodes_in_category("grammar").count(), 1);
    }

    proptest! {
        /// Layered graphs wired with reciprocal edges always validate.
        #[test]
        fn layered_graphs_validate(widths in proptest::collection::vec(1usize..4, 1..5), seed in any::<u64>()) {
            let mut nodes: Vec<SkillNode> = Vec::new();
            let mut previous: Vec<String> = Vec::new();
            for (layer, width) in widths.iter().enumerate() {
                let mut current = Vec::new();
                for slot in 0..*width {
                    let id = format!("n{}-{}", layer, slot);
                    let mut node = SkillNode::new(id.as_str(), id.as_str(), "generated", layer as u32 + 1);
                    if !previous.is_empty() {
                        let pick = (seed as usize).wrapping_add(slot) % previous.len();
                        node = node.with_prerequisite(previous[pick].as_str());
                        let parent = nodes.iter_mut().find(|n| n.id.as_str() == previous[pick]).unwrap();
                        parent.unlocks.push(NodeId::from(id.as_str()));
                    }
                    current.push(id);
                    nodes.push(node);
                }
                previous = current;
            }
            prop_assert!(validate_graph(&nodes).is_ok());
        }
    }
}
