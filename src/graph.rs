mod builder;
mod core;
pub mod removal;

pub use self::builder::GraphBuilder;
pub use self::core::{NodeFeatures, NodeId, SocialGraph};
pub use self::removal::{shortest_path_without_edge, EdgeRemoval};
