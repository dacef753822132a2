use std::collections::BTreeMap;

use link_features::features::{FeatureVector, Label};
use link_features::NodeId;

use crate::statistics::Statistics;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ExtractionOutput {
    pub nodes: usize,
    pub edges: usize,
    pub communities: usize,
    pub modularity: f64,
    pub link_features: Vec<LinkFeature>
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LinkFeature {
    pub u: NodeId,
    pub v: NodeId,
    pub label: Label,
    #[serde(flatten)] pub features: FeatureVector
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CommunityOutput {
    pub nodes: usize,
    pub edges: usize,
    pub modularity: f64,
    pub levels: usize,
    pub community_sizes: Statistics,
    pub degree_centrality: Statistics,
    pub communities: Vec<Vec<NodeId>>
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NodeFeatureOutput {
    pub egos: Vec<NodeId>,
    pub dimension: usize,
    pub nodes: BTreeMap<NodeId, Vec<f64>>
}
