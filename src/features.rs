pub mod centrality;
pub mod community;
pub mod extractor;
pub mod similarity;

pub use centrality::DegreeCentrality;
pub use community::CommunityPartition;
pub use extractor::{
    check_lengths, extract_features, CandidatePair, FeatureExtractor, FeatureOptions, FeatureVector, Label,
};
pub use similarity::jaccard_coefficient;
