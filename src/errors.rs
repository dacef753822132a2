use error_set::error_set;

use crate::graph::NodeId;

error_set!{
    FeatureExtractionError = GraphError || InputError;
    GraphBuilderError = {
        #[display("Undefined vertex: {vertex}")]
        UndefinedVertex{vertex: NodeId},
        #[display("Duplicate edge: {from_vertex} -- {to_vertex}")]
        DuplicateEdge{from_vertex: NodeId, to_vertex: NodeId},
        #[display("Duplicate vertex: {vertex}")]
        DuplicateVertex{vertex: NodeId},
        #[display("Self loop on vertex: {vertex}")]
        SelfLoop{vertex: NodeId}
    };
    GraphError = {
        #[display("Unknown node: {node}")]
        UnknownNode{node: NodeId},
    };
    InputError = {
        #[display("Input length mismatch: {pairs} pairs but {labels} labels")]
        LengthMismatch{pairs: usize, labels: usize},
    };
    FeatureIndexError = {
        #[display("Malformed feature name line: {line}")]
        MalformedFeatureName{line: String},
        #[display("Feature index {index} out of range (dimension {dimension})")]
        FeatureIndexOutOfRange{index: usize, dimension: usize},
        #[display("Node {node} has {found} feature values, expected {expected}")]
        FeatureCountMismatch{node: NodeId, found: usize, expected: usize},
    };
}
