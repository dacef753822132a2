//! Multi-level Louvain community detection.
//!
//! Nodes are visited in ascending id order and candidate communities in
//! ascending community order, so a given graph always produces the same
//! partition. Each level greedily moves nodes between neighbouring
//! communities while modularity improves, then collapses every community
//! into a single weighted node and starts over on the smaller graph.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::errors::GraphError;
use crate::graph::{NodeId, SocialGraph};

const MAX_PASSES: usize = 100;
const MIN_GAIN: f64 = 1e-10;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CommunityPartition {
    assignments: HashMap<NodeId, usize>,
    community_count: usize,
    modularity: f64,
    levels: usize,
}

impl CommunityPartition {
    pub fn louvain(graph: &SocialGraph) -> Self {
        let nodes = graph.nodes().sorted().collect_vec();
        if nodes.is_empty() {
            return Self::default();
        }
        let index = nodes.iter()
            .enumerate()
            .map(|(i, node)| (*node, i))
            .collect::<HashMap<_, _>>();
        let mut level_graph = WeightedGraph::from_social_graph(graph, &index);
        // membership[i] = community of original node i at the current level
        let mut membership = (0..nodes.len()).collect_vec();
        let mut levels = 0;

        if level_graph.total_weight() > 0.0 {
            loop {
                let (mut communities, moved) = level_graph.local_moving();
                if !moved {
                    break;
                }
                let count = renumber(&mut communities);
                for community in membership.iter_mut() {
                    *community = communities[*community];
                }
                levels += 1;
                log::debug!("Louvain level {levels}: {count} communities");
                if count == level_graph.len() {
                    break;
                }
                level_graph = level_graph.aggregate(&communities, count);
            }
        }

        let community_count = renumber(&mut membership);
        let original = WeightedGraph::from_social_graph(graph, &index);
        let modularity = original.modularity(&membership);
        let assignments = nodes.into_iter()
            .zip(membership)
            .collect();
        Self { assignments, community_count, modularity, levels }
    }

    pub fn community_of(&self, node: NodeId) -> Result<usize, GraphError> {
        self.assignments.get(&node)
            .copied()
            .ok_or(GraphError::UnknownNode { node })
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Newman modularity of the partition on the original graph.
    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Members of each community, sorted, indexed by community id.
    pub fn members(&self) -> Vec<Vec<NodeId>> {
        let mut members = vec![Vec::new(); self.community_count];
        for (node, community) in &self.assignments {
            members[*community].push(*node);
        }
        for group in members.iter_mut() {
            group.sort_unstable();
        }
        members
    }
}

/// Relabels communities to `0..k` in order of first appearance. Returns `k`.
fn renumber(communities: &mut [usize]) -> usize {
    let mut mapping = HashMap::new();
    for community in communities.iter_mut() {
        let next = mapping.len();
        *community = *mapping.entry(*community).or_insert(next);
    }
    mapping.len()
}

/// Symmetric weighted adjacency. The diagonal holds the weight of edges
/// internal to a collapsed node, counted once per direction.
struct WeightedGraph {
    adjacency: Vec<BTreeMap<usize, f64>>,
}

impl WeightedGraph {
    fn from_social_graph(graph: &SocialGraph, index: &HashMap<NodeId, usize>) -> Self {
        let mut adjacency = vec![BTreeMap::new(); index.len()];
        for (a, b) in graph.edges() {
            let (i, j) = (index[&a], index[&b]);
            *adjacency[i].entry(j).or_insert(0.0) += 1.0;
            *adjacency[j].entry(i).or_insert(0.0) += 1.0;
        }
        Self { adjacency }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    fn degree(&self, node: usize) -> f64 {
        self.adjacency[node].values().sum()
    }

    /// Twice the total edge weight.
    fn total_weight(&self) -> f64 {
        (0..self.len()).map(|i| self.degree(i)).sum()
    }

    /// One level of greedy node moves. Returns the community of every node
    /// and whether any node changed community.
    fn local_moving(&self) -> (Vec<usize>, bool) {
        let n = self.len();
        let two_m = self.total_weight();
        let degrees = (0..n).map(|i| self.degree(i)).collect_vec();
        let mut communities = (0..n).collect_vec();
        let mut totals = degrees.clone();
        let mut moved = false;

        for _ in 0..MAX_PASSES {
            let mut improved = false;
            for node in 0..n {
                let current = communities[node];
                let k = degrees[node];
                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for (&neighbour, &weight) in &self.adjacency[node] {
                    if neighbour != node {
                        *links.entry(communities[neighbour]).or_insert(0.0) += weight;
                    }
                }

                totals[current] -= k;
                let gain = |community: usize, links_to: f64| links_to - totals[community] * k / two_m;
                let mut best = current;
                let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0));
                for (&candidate, &links_to) in &links {
                    let candidate_gain = gain(candidate, links_to);
                    if candidate_gain > best_gain + MIN_GAIN {
                        best = candidate;
                        best_gain = candidate_gain;
                    }
                }
                totals[best] += k;

                if best != current {
                    communities[node] = best;
                    improved = true;
                    moved = true;
                }
            }
            if !improved {
                break;
            }
        }
        (communities, moved)
    }

    /// Collapses each community (dense ids `0..count`) into a single node.
    fn aggregate(&self, communities: &[usize], count: usize) -> Self {
        let mut adjacency = vec![BTreeMap::new(); count];
        for (node, edges) in self.adjacency.iter().enumerate() {
            let from = communities[node];
            for (&neighbour, &weight) in edges {
                *adjacency[from].entry(communities[neighbour]).or_insert(0.0) += weight;
            }
        }
        Self { adjacency }
    }

    fn modularity(&self, communities: &[usize]) -> f64 {
        let two_m = self.total_weight();
        if two_m == 0.0 {
            return 0.0;
        }
        let mut internal: HashMap<usize, f64> = HashMap::new();
        let mut totals: HashMap<usize, f64> = HashMap::new();
        for (node, edges) in self.adjacency.iter().enumerate() {
            let community = communities[node];
            *totals.entry(community).or_insert(0.0) += self.degree(node);
            for (&neighbour, &weight) in edges {
                if communities[neighbour] == community {
                    *internal.entry(community).or_insert(0.0) += weight;
                }
            }
        }
        totals.iter()
            .map(|(community, total)| {
                let inside = internal.get(community).copied().unwrap_or(0.0);
                inside / two_m - (total / two_m).powi(2)
            })
            .sum()
    }
}
