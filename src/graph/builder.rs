use std::collections::HashMap;

use petgraph::graphmap::UnGraphMap;

use crate::errors::GraphBuilderError;
use super::core::{NodeId, SocialGraph};

pub struct GraphBuilder {
    graph: UnGraphMap<NodeId, ()>,
    features: HashMap<NodeId, Vec<f64>>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: UnGraphMap::new(),
            features: HashMap::new(),
        }
    }

    /// Builds a graph from an edge list, creating vertices on first sight.
    pub fn from_edges(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<SocialGraph, GraphBuilderError> {
        let mut builder = Self::new();
        builder.add_edges_in_place(edges)?;
        Ok(builder.build())
    }

    pub fn contains_vertex(&self, vertex: NodeId) -> bool {
        self.graph.contains_node(vertex)
    }

    pub fn add_vertex_in_place(&mut self, vertex: NodeId) -> Result<(), GraphBuilderError> {
        if self.graph.contains_node(vertex) {
            return Err(GraphBuilderError::DuplicateVertex { vertex });
        }
        self.graph.add_node(vertex);
        Ok(())
    }

    pub fn add_edge_in_place(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphBuilderError> {
        for vertex in [from, to] {
            if !self.graph.contains_node(vertex) {
                return Err(GraphBuilderError::UndefinedVertex { vertex });
            }
        }
        if from == to {
            return Err(GraphBuilderError::SelfLoop { vertex: from });
        }
        if self.graph.contains_edge(from, to) {
            return Err(GraphBuilderError::DuplicateEdge { from_vertex: from, to_vertex: to });
        }
        self.graph.add_edge(from, to, ());
        Ok(())
    }

    /// Adds every edge, creating missing vertices. Duplicate edges and self loops
    /// are still rejected.
    pub fn add_edges_in_place(&mut self, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<(), GraphBuilderError> {
        for (from, to) in edges {
            for vertex in [from, to] {
                if !self.graph.contains_node(vertex) {
                    self.graph.add_node(vertex);
                }
            }
            self.add_edge_in_place(from, to)?;
        }
        Ok(())
    }

    pub fn set_features_in_place(&mut self, vertex: NodeId, features: Vec<f64>) -> Result<(), GraphBuilderError> {
        if !self.graph.contains_node(vertex) {
            return Err(GraphBuilderError::UndefinedVertex { vertex });
        }
        self.features.insert(vertex, features);
        Ok(())
    }

    pub fn build(self) -> SocialGraph {
        SocialGraph::new(self.graph, self.features)
    }
}
