pub(crate) mod communities;
pub(crate) mod extract;
pub(crate) mod node_features;
