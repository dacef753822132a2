use std::ops::Deref;

use crate::errors::GraphError;
use super::core::{NodeId, SocialGraph};

/// Removes the edge `(u, v)` from a graph for as long as the guard lives.
///
/// The guard holds the only mutable borrow of the graph, so nothing else can
/// observe the graph while the edge is missing. Dropping the guard puts the
/// edge back, including when the owning scope unwinds.
pub struct EdgeRemoval<'g> {
    graph: &'g mut SocialGraph,
    removed: Option<(NodeId, NodeId)>,
}

impl<'g> EdgeRemoval<'g> {
    /// If `(u, v)` is not an edge the guard is a no-op.
    pub fn new(graph: &'g mut SocialGraph, u: NodeId, v: NodeId) -> Self {
        let removed = graph.detach_edge(u, v).then_some((u, v));
        if removed.is_some() {
            log::trace!("Temporarily removed edge {u} -- {v}");
        }
        Self { graph, removed }
    }

    pub fn removed_edge(&self) -> Option<(NodeId, NodeId)> {
        self.removed
    }
}

impl Deref for EdgeRemoval<'_> {
    type Target = SocialGraph;

    fn deref(&self) -> &Self::Target {
        &*self.graph
    }
}

impl Drop for EdgeRemoval<'_> {
    fn drop(&mut self) {
        if let Some((u, v)) = self.removed.take() {
            self.graph.reattach_edge(u, v);
            log::trace!("Restored edge {u} -- {v}");
        }
    }
}

/// Number of nodes on the shortest path between `u` and `v` when the direct
/// edge `u -- v` is ignored; `0` when no such path exists.
///
/// Unknown nodes are rejected before the graph is touched.
pub fn shortest_path_without_edge(graph: &mut SocialGraph, u: NodeId, v: NodeId) -> Result<usize, GraphError> {
    graph.ensure_node(u)?;
    graph.ensure_node(v)?;
    let view = EdgeRemoval::new(graph, u, v);
    let length = view.shortest_path(u, v)?
        .map(|path| path.len())
        .unwrap_or(0);
    Ok(length)
}
