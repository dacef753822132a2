use std::path::PathBuf;

use itertools::Itertools;
use prettytable::{Cell, Row, Table};

use link_features::features::{CommunityPartition, DegreeCentrality};
use link_features::loaders::load_graph_from_file;

use crate::output_schema::CommunityOutput;
use crate::statistics::Statistics;

const SHOWN_COMMUNITIES: usize = 10;

pub fn compute_communities(graph_file: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let graph = load_graph_from_file(&graph_file)?;
    let partition = CommunityPartition::louvain(&graph);
    let centrality = DegreeCentrality::compute(&graph);
    let communities = partition.members();
    log::info!(
        "{} communities over {} levels, modularity {:.4}",
        partition.community_count(), partition.levels(), partition.modularity()
    );

    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("Community"), Cell::new("Size"), Cell::new("Mean centrality")
    ]));
    let largest = communities.iter()
        .enumerate()
        .sorted_by_key(|(id, members)| (std::cmp::Reverse(members.len()), *id))
        .take(SHOWN_COMMUNITIES);
    for (id, members) in largest {
        let mean = Statistics::from(
            members.iter().filter_map(|node| centrality.score(*node).ok())
        ).mean();
        table.add_row(Row::new(vec![
            Cell::new(&id.to_string()),
            Cell::new(&members.len().to_string()),
            Cell::new(&format!("{mean:.4}")),
        ]));
    }
    table.printstd();

    let out = CommunityOutput {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        modularity: partition.modularity(),
        levels: partition.levels(),
        community_sizes: Statistics::from(communities.iter().map(|c| c.len() as f64)),
        degree_centrality: Statistics::from(centrality.iter().map(|(_, score)| score)),
        communities,
    };
    serde_json::to_writer_pretty(std::fs::File::create(output)?, &out)?;
    Ok(())
}
