use std::path::PathBuf;

use link_features::loaders::ego::{discover_egos, load_ego_network};
use link_features::NodeId;

use crate::output_schema::NodeFeatureOutput;

pub fn load_node_features(directory: PathBuf, egos: Vec<NodeId>, output: PathBuf) -> anyhow::Result<()> {
    if !directory.is_dir() {
        return Err(anyhow::anyhow!("Not a directory: {}", directory.display()));
    }
    let egos = if egos.is_empty() { discover_egos(&directory)? } else { egos };
    if egos.is_empty() {
        log::warn!("No ego networks found in {}", directory.display());
        return Ok(());
    }
    let network = load_ego_network(&directory, Some(egos.as_slice()))?;
    let outside = network.features.keys()
        .filter(|node| !network.graph.contains_node(**node))
        .count();
    if outside > 0 {
        log::warn!("{outside} feature vectors belong to nodes without relationships");
    }
    let out = NodeFeatureOutput {
        egos,
        dimension: network.index.dimension(),
        nodes: network.features.into_iter().collect(),
    };
    serde_json::to_writer_pretty(std::fs::File::create(&output)?, &out)?;
    log::info!("Wrote {} node feature vectors to {}", out.nodes.len(), output.display());
    Ok(())
}
