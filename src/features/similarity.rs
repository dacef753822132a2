use crate::errors::GraphError;
use crate::graph::{NodeId, SocialGraph};

/// Jaccard coefficient of the neighbourhoods of `u` and `v`.
///
/// Uses the plain structural neighbours, so when `u -- v` is an edge each
/// endpoint appears in the other's neighbourhood. An empty union scores `0`.
pub fn jaccard_coefficient(graph: &SocialGraph, u: NodeId, v: NodeId) -> Result<f64, GraphError> {
    let nu = graph.neighbour_set(u)?;
    let nv = graph.neighbour_set(v)?;
    let union = nu.union(&nv).count();
    if union == 0 {
        return Ok(0.0);
    }
    let intersection = nu.intersection(&nv).count();
    Ok(intersection as f64 / union as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn identical_neighbourhoods_score_one() {
        // 1 and 2 both follow 10 and 11, and nothing else
        let g = GraphBuilder::from_edges([(1, 10), (1, 11), (2, 10), (2, 11)]).unwrap();
        assert_eq!(jaccard_coefficient(&g, 1, 2).unwrap(), 1.0);
    }

    #[test]
    fn isolated_nodes_score_zero() {
        let mut builder = GraphBuilder::new();
        builder.add_vertex_in_place(1).unwrap();
        builder.add_vertex_in_place(2).unwrap();
        let g = builder.build();
        assert_eq!(jaccard_coefficient(&g, 1, 2).unwrap(), 0.0);
    }

    #[test]
    fn partial_overlap() {
        let g = GraphBuilder::from_edges([(1, 3), (1, 4), (2, 4), (2, 5)]).unwrap();
        // {3, 4} vs {4, 5}
        let score = jaccard_coefficient(&g, 1, 2).unwrap();
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn adjacent_endpoints_count_each_other() {
        let g = GraphBuilder::from_edges([(1, 2), (1, 3), (2, 3)]).unwrap();
        // {2, 3} vs {1, 3}
        let score = jaccard_coefficient(&g, 1, 2).unwrap();
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let g = GraphBuilder::from_edges([(1, 2)]).unwrap();
        assert!(matches!(
            jaccard_coefficient(&g, 1, 3),
            Err(GraphError::UnknownNode { node: 3 })
        ));
    }
}
