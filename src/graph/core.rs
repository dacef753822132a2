use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graphmap::UnGraphMap;

use crate::errors::GraphError;

/// Opaque account / profile identifier.
pub type NodeId = u64;

/// Per-node attribute vectors, as produced by the ego-network loader.
pub type NodeFeatures = HashMap<NodeId, Vec<f64>>;

/// Undirected, unweighted, simple graph of relationships.
///
/// Instances are created through [`super::GraphBuilder`], which rejects self
/// loops and duplicate edges. The only mutation exposed afterwards is the
/// scoped edge removal in [`super::removal`], which always puts the edge back.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    graph: UnGraphMap<NodeId, ()>,
    features: NodeFeatures,
}

impl SocialGraph {
    pub(super) fn new(graph: UnGraphMap<NodeId, ()>, features: NodeFeatures) -> Self {
        Self { graph, features }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.graph.contains_edge(u, v)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.nodes()
    }

    /// Every undirected edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph.all_edges().map(|(a, b, _)| (a, b))
    }

    pub(crate) fn ensure_node(&self, node: NodeId) -> Result<(), GraphError> {
        if self.graph.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode { node })
        }
    }

    pub fn neighbours(&self, node: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, GraphError> {
        self.ensure_node(node)?;
        Ok(self.graph.neighbors(node))
    }

    pub fn neighbour_set(&self, node: NodeId) -> Result<HashSet<NodeId>, GraphError> {
        Ok(self.neighbours(node)?.collect())
    }

    pub fn degree(&self, node: NodeId) -> Result<usize, GraphError> {
        Ok(self.neighbours(node)?.count())
    }

    pub fn node_features(&self, node: NodeId) -> Option<&[f64]> {
        self.features.get(&node).map(Vec::as_slice)
    }

    /// Attaches feature vectors to the nodes present in the graph.
    /// Returns how many vectors were attached; vectors of unknown nodes are dropped.
    pub fn attach_features(&mut self, features: NodeFeatures) -> usize {
        let mut attached = 0;
        for (node, vector) in features {
            if self.graph.contains_node(node) {
                self.features.insert(node, vector);
                attached += 1;
            } else {
                log::trace!("Dropping features of node {node}: not in graph");
            }
        }
        attached
    }

    /// Breadth-first shortest path from `from` to `to`, both endpoints included.
    /// `None` when `to` is unreachable.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<NodeId>>, GraphError> {
        self.ensure_node(from)?;
        self.ensure_node(to)?;
        if from == to {
            return Ok(Some(vec![from]));
        }
        let mut visited = HashSet::from([from]);
        let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors(current) {
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, current);
                if next == to {
                    let mut path = vec![to];
                    let mut cursor = to;
                    while let Some(&p) = parent.get(&cursor) {
                        path.push(p);
                        cursor = p;
                    }
                    path.reverse();
                    return Ok(Some(path));
                }
                queue.push_back(next);
            }
        }
        Ok(None)
    }

    // Raw mutation, only reachable through `EdgeRemoval`.

    pub(super) fn detach_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        self.graph.remove_edge(u, v).is_some()
    }

    pub(super) fn reattach_edge(&mut self, u: NodeId, v: NodeId) {
        self.graph.add_edge(u, v, ());
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    #[test]
    fn shortest_path_on_path_graph() {
        let g = GraphBuilder::from_edges([(1, 2), (2, 3), (3, 4)]).unwrap();
        assert_eq!(g.shortest_path(1, 4).unwrap(), Some(vec![1, 2, 3, 4]));
        assert_eq!(g.shortest_path(2, 2).unwrap(), Some(vec![2]));
    }

    #[test]
    fn shortest_path_between_components_is_none() {
        let mut builder = GraphBuilder::new();
        builder.add_edges_in_place([(1, 2), (3, 4)]).unwrap();
        let g = builder.build();
        assert_eq!(g.shortest_path(1, 4).unwrap(), None);
    }

    #[test]
    fn unknown_node_is_reported() {
        let g = GraphBuilder::from_edges([(1, 2)]).unwrap();
        let err = g.shortest_path(1, 99).unwrap_err();
        assert!(matches!(err, crate::errors::GraphError::UnknownNode { node: 99 }));
        assert!(g.degree(42).is_err());
    }

    #[test]
    fn attach_features_skips_unknown_nodes() {
        let mut g = GraphBuilder::from_edges([(1, 2)]).unwrap();
        let features = [(1, vec![1.0, 0.0]), (7, vec![0.0, 2.0])].into_iter().collect();
        assert_eq!(g.attach_features(features), 1);
        assert_eq!(g.node_features(1), Some([1.0, 0.0].as_slice()));
        assert_eq!(g.node_features(7), None);
    }
}
