use std::path::Path;

use crate::graph::SocialGraph;

pub mod ego;
pub mod pairs;
pub mod relationships;

pub use pairs::load_labeled_pairs;
pub use relationships::{build_graph, Relationship};

pub fn load_graph_from_file(path: impl AsRef<Path>) -> anyhow::Result<SocialGraph> {
    let path = path.as_ref();
    let ext = path.extension()
        .ok_or_else(|| anyhow::anyhow!("Need a file extension: {}", path.display()))?;
    let relationships = match ext.to_str() {
        Some("csv") => relationships::read_relationships_csv(path)?,
        Some("txt") | Some("edges") => relationships::read_edge_list(path)?,
        x => return Err(anyhow::anyhow!("Unknown file extension: {:?}", x)),
    };
    log::info!("Read {} relationships from {}", relationships.len(), path.display());
    Ok(build_graph(relationships))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("contacts.csv");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "source,target\n1,2\n2,3").unwrap();
        let g = load_graph_from_file(&csv_path).unwrap();
        assert_eq!(g.edge_count(), 2);

        let txt_path = dir.path().join("combined.txt");
        let mut f = std::fs::File::create(&txt_path).unwrap();
        writeln!(f, "0 1\n0 2\n1 2").unwrap();
        let g = load_graph_from_file(&txt_path).unwrap();
        assert_eq!(g.edge_count(), 3);

        assert!(load_graph_from_file(dir.path().join("graph.json")).is_err());
        assert!(load_graph_from_file(dir.path().join("graph")).is_err());
    }
}
