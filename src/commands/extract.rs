use std::collections::BTreeMap;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use prettytable::{Cell, Row, Table};

use link_features::features::{check_lengths, FeatureExtractor, FeatureOptions, Label};
use link_features::loaders::{load_graph_from_file, load_labeled_pairs};

use crate::output_schema::{ExtractionOutput, LinkFeature};
use crate::statistics::Statistics;

const FEATURE_NAMES: [&str; 4] = [
    "shortest_path_without_edge",
    "jaccard_coefficient",
    "centrality_u",
    "centrality_v",
];

pub fn extract_link_features(graph_file: PathBuf,
                             pairs_file: PathBuf,
                             output: PathBuf,
                             include_communities: bool) -> anyhow::Result<()>
{
    let mut graph = load_graph_from_file(&graph_file)?;
    let (pairs, labels) = load_labeled_pairs(&pairs_file)?;
    check_lengths(&pairs, &labels)?;
    log::info!("Extracting features for {} pairs from {}", pairs.len(), pairs_file.display());

    let options = FeatureOptions { include_communities };
    let mut extractor = FeatureExtractor::new(&mut graph, options);

    let progress = ProgressBar::new(pairs.len() as u64);
    progress.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} pairs [{elapsed_precise}]")?);
    let mut link_features = Vec::with_capacity(pairs.len());
    for (&(u, v), &label) in pairs.iter().zip(&labels) {
        let features = extractor.pair_features(u, v)?;
        link_features.push(LinkFeature { u, v, label, features });
        progress.inc(1);
    }
    progress.finish_and_clear();

    print_summary(&link_features);

    let out = ExtractionOutput {
        nodes: extractor.graph().node_count(),
        edges: extractor.graph().edge_count(),
        communities: extractor.partition().community_count(),
        modularity: extractor.partition().modularity(),
        link_features,
    };
    let file = std::fs::File::create(&output)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &out)?;
    log::info!("Wrote {} feature vectors to {}", out.link_features.len(), output.display());
    Ok(())
}

fn print_summary(link_features: &[LinkFeature]) {
    let mut by_label: BTreeMap<Label, Vec<[f64; 4]>> = BTreeMap::new();
    for feature in link_features {
        by_label.entry(feature.label).or_default().push(feature.features.as_array());
    }

    let mut table = Table::new();
    let mut header = vec![Cell::new("Feature")];
    header.extend(by_label.iter().map(|(label, rows)| Cell::new(&format!("label {label} (n={})", rows.len()))));
    table.set_titles(Row::new(header));
    for (column, name) in FEATURE_NAMES.iter().enumerate() {
        let mut row = vec![Cell::new(name)];
        for rows in by_label.values() {
            let stats = Statistics::from(rows.iter().map(|r| r[column]));
            let content = format!("{:.4} \u{00B1} {:.4}", stats.mean(), stats.std_dev());
            row.push(Cell::new(content.as_str()));
        }
        table.add_row(Row::new(row));
    }
    table.printstd();
}
