use std::collections::HashMap;

use crate::errors::GraphError;
use crate::graph::{NodeId, SocialGraph};

/// Normalised degree centrality: `degree / (|V| - 1)`.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DegreeCentrality {
    scores: HashMap<NodeId, f64>,
}

impl DegreeCentrality {
    /// A single-node graph scores `0`; an empty graph yields an empty table.
    pub fn compute(graph: &SocialGraph) -> Self {
        let mut degrees = graph.nodes()
            .map(|node| (node, 0usize))
            .collect::<HashMap<_, _>>();
        for (a, b) in graph.edges() {
            *degrees.entry(a).or_insert(0) += 1;
            *degrees.entry(b).or_insert(0) += 1;
        }
        let n = graph.node_count();
        let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
        let scores = degrees.into_iter()
            .map(|(node, degree)| (node, degree as f64 * scale))
            .collect();
        Self { scores }
    }

    pub fn score(&self, node: NodeId) -> Result<f64, GraphError> {
        self.scores.get(&node)
            .copied()
            .ok_or(GraphError::UnknownNode { node })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().map(|(node, score)| (*node, *score))
    }
}
