//! Link-prediction features for social relationship graphs.
//!
//! The central entry point is [`features::extract_features`], which turns a
//! graph and a list of labeled candidate pairs into one structural feature
//! vector per pair. The [`loaders`] module reads the edge lists, pair lists
//! and ego-network files those graphs are built from.

pub mod errors;
pub mod features;
pub mod graph;
pub mod loaders;

pub use errors::{FeatureExtractionError, GraphBuilderError, GraphError, InputError};
pub use features::{extract_features, FeatureOptions, FeatureVector};
pub use graph::{GraphBuilder, NodeId, SocialGraph};
