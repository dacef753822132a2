use std::path::Path;

use crate::features::{CandidatePair, Label};
use crate::graph::NodeId;

#[derive(Debug, Clone, serde::Deserialize)]
struct PairRecord {
    u: NodeId,
    v: NodeId,
    label: Label,
}

/// Reads a `u,v,label` CSV into parallel pair and label lists.
pub fn load_labeled_pairs(path: impl AsRef<Path>) -> anyhow::Result<(Vec<CandidatePair>, Vec<Label>)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut pairs = Vec::new();
    let mut labels = Vec::new();
    for result in reader.deserialize() {
        let record: PairRecord = result?;
        pairs.push((record.u, record.v));
        labels.push(record.label);
    }
    Ok((pairs, labels))
}
