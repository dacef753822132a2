use crate::errors::{FeatureExtractionError, GraphError, InputError};
use crate::graph::{shortest_path_without_edge, NodeId, SocialGraph};
use super::centrality::DegreeCentrality;
use super::community::CommunityPartition;
use super::similarity::jaccard_coefficient;

/// Unordered candidate pair `(u, v)`.
pub type CandidatePair = (NodeId, NodeId);

/// 1 for an observed edge, 0 for a sampled non-edge. Never inspected.
pub type Label = u8;

#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureOptions {
    /// Append the community ids of both endpoints to every feature vector.
    pub include_communities: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FeatureVector {
    pub shortest_path_without_edge: usize,
    pub jaccard_coefficient: f64,
    pub centrality_u: f64,
    pub centrality_v: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communities: Option<(usize, usize)>,
}

impl FeatureVector {
    /// The four structural features, in emission order.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.shortest_path_without_edge as f64,
            self.jaccard_coefficient,
            self.centrality_u,
            self.centrality_v,
        ]
    }

    /// Structural features followed by the community ids, when present.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = self.as_array().to_vec();
        if let Some((cu, cv)) = self.communities {
            values.push(cu as f64);
            values.push(cv as f64);
        }
        values
    }
}

/// Computes pair features against one graph.
///
/// Centrality and the community partition are computed once in [`Self::new`]
/// and reused for every pair. The extractor keeps the mutable borrow of the
/// graph for its whole lifetime because the shortest path query removes and
/// restores edges.
pub struct FeatureExtractor<'g> {
    graph: &'g mut SocialGraph,
    centrality: DegreeCentrality,
    partition: CommunityPartition,
    options: FeatureOptions,
}

impl<'g> FeatureExtractor<'g> {
    pub fn new(graph: &'g mut SocialGraph, options: FeatureOptions) -> Self {
        let centrality = DegreeCentrality::compute(graph);
        let partition = CommunityPartition::louvain(graph);
        log::info!(
            "Precomputed statistics for {} nodes / {} edges: {} communities (modularity {:.4})",
            graph.node_count(),
            graph.edge_count(),
            partition.community_count(),
            partition.modularity()
        );
        Self { graph, centrality, partition, options }
    }

    pub fn graph(&self) -> &SocialGraph {
        &*self.graph
    }

    pub fn centrality(&self) -> &DegreeCentrality {
        &self.centrality
    }

    pub fn partition(&self) -> &CommunityPartition {
        &self.partition
    }

    pub fn pair_features(&mut self, u: NodeId, v: NodeId) -> Result<FeatureVector, GraphError> {
        let shortest_path = shortest_path_without_edge(self.graph, u, v)?;
        let jaccard = jaccard_coefficient(self.graph, u, v)?;
        let centrality_u = self.centrality.score(u)?;
        let centrality_v = self.centrality.score(v)?;
        let community_u = self.partition.community_of(u)?;
        let community_v = self.partition.community_of(v)?;
        Ok(FeatureVector {
            shortest_path_without_edge: shortest_path,
            jaccard_coefficient: jaccard,
            centrality_u,
            centrality_v,
            communities: self.options.include_communities.then_some((community_u, community_v)),
        })
    }
}

pub fn check_lengths(pairs: &[CandidatePair], labels: &[Label]) -> Result<(), InputError> {
    if pairs.len() != labels.len() {
        return Err(InputError::LengthMismatch { pairs: pairs.len(), labels: labels.len() });
    }
    Ok(())
}

/// One feature vector per pair, in input order.
///
/// Fails with `LengthMismatch` before touching the graph when `pairs` and
/// `labels` differ in length, and with `UnknownNode` on the first pair that
/// references a node outside the graph.
pub fn extract_features(graph: &mut SocialGraph,
                        pairs: &[CandidatePair],
                        labels: &[Label],
                        options: FeatureOptions) -> Result<Vec<FeatureVector>, FeatureExtractionError>
{
    check_lengths(pairs, labels)?;
    let mut extractor = FeatureExtractor::new(graph, options);
    let mut features = Vec::with_capacity(pairs.len());
    for &(u, v) in pairs {
        features.push(extractor.pair_features(u, v)?);
    }
    log::debug!("Extracted {} feature vectors", features.len());
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn sample_graph() -> SocialGraph {
        // square 1-2-3-4 with diagonal 1-3 and a pendant 5 on 4
        GraphBuilder::from_edges([(1, 2), (2, 3), (3, 4), (4, 1), (1, 3), (4, 5)]).unwrap()
    }

    #[test]
    fn output_follows_input_order() {
        let mut g = sample_graph();
        let pairs = [(1, 2), (2, 4), (5, 3), (4, 5)];
        let labels = [1, 0, 0, 1];
        let features = extract_features(&mut g, &pairs, &labels, FeatureOptions::default()).unwrap();
        assert_eq!(features.len(), pairs.len());

        // 1-2 is an edge; without it the path is 1-3-2
        assert_eq!(features[0].shortest_path_without_edge, 3);
        // 2-4 is not an edge; 2-1-4
        assert_eq!(features[1].shortest_path_without_edge, 3);
        // 5-4-3
        assert_eq!(features[2].shortest_path_without_edge, 3);
        // 4-5 is a bridge
        assert_eq!(features[3].shortest_path_without_edge, 0);

        // N(2) = {1, 3}, N(4) = {1, 3, 5}
        assert!((features[1].jaccard_coefficient - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(features[2].centrality_u, 0.25);
        assert_eq!(features[2].centrality_v, 0.75);
        assert!(features.iter().all(|f| f.communities.is_none()));
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn length_mismatch_is_reported_before_node_checks() {
        let mut g = sample_graph();
        let err = extract_features(&mut g, &[(1, 99), (2, 3)], &[1], FeatureOptions::default())
            .unwrap_err();
        assert!(matches!(err, FeatureExtractionError::LengthMismatch { pairs: 2, labels: 1 }));
    }

    #[test]
    fn unknown_node_is_reported() {
        let mut g = sample_graph();
        let err = extract_features(&mut g, &[(1, 2), (7, 1)], &[1, 0], FeatureOptions::default())
            .unwrap_err();
        assert!(matches!(err, FeatureExtractionError::UnknownNode { node: 7 }));
        assert_eq!(g.edge_count(), 6);
        assert!(g.has_edge(1, 2));
    }

    #[test]
    fn empty_input_yields_no_features() {
        let mut g = sample_graph();
        let features = extract_features(&mut g, &[], &[], FeatureOptions::default()).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn communities_are_appended_on_request() {
        let mut g = sample_graph();
        let options = FeatureOptions { include_communities: true };
        let mut extractor = FeatureExtractor::new(&mut g, options);
        let f = extractor.pair_features(1, 3).unwrap();
        let (cu, cv) = f.communities.unwrap();
        assert_eq!(cu, extractor.partition().community_of(1).unwrap());
        assert_eq!(cv, extractor.partition().community_of(3).unwrap());
        assert_eq!(f.to_vec().len(), 6);
        assert_eq!(f.as_array()[0], 3.0);
    }

    #[test]
    fn full_degree_node_has_unit_centrality() {
        let mut g = GraphBuilder::from_edges([(1, 2), (1, 3), (1, 4), (2, 3)]).unwrap();
        let features = extract_features(&mut g, &[(1, 4)], &[1], FeatureOptions::default()).unwrap();
        assert_eq!(features[0].centrality_u, 1.0);
        assert!((features[0].centrality_v - 1.0 / 3.0).abs() < 1e-12);
    }
}
