use std::io::BufRead;
use std::path::Path;

use crate::errors::GraphBuilderError;
use crate::graph::{GraphBuilder, NodeId, SocialGraph};

/// One follow relationship: `source` follows `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct Relationship {
    pub source: NodeId,
    pub target: NodeId,
}

/// Reads a `source,target` CSV as dumped by the contact fetcher.
pub fn read_relationships_csv(path: impl AsRef<Path>) -> anyhow::Result<Vec<Relationship>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut results = Vec::new();
    for result in reader.deserialize() {
        let record: Relationship = result?;
        results.push(record);
    }
    Ok(results)
}

/// Reads a whitespace separated edge list. Blank lines and `#` comments are skipped.
pub fn read_edge_list(path: impl AsRef<Path>) -> anyhow::Result<Vec<Relationship>> {
    let path = path.as_ref();
    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
    let mut results = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts = line.split_whitespace().collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!(
                "Invalid edge on line {} of {}: {}", number + 1, path.display(), line
            ));
        }
        results.push(Relationship {
            source: parts[0].parse()?,
            target: parts[1].parse()?,
        });
    }
    Ok(results)
}

/// Builds the undirected graph of a relationship list.
///
/// Direction is dropped, so `a -> b` and `b -> a` become a single edge.
/// Self follows are skipped.
pub fn build_graph(relationships: impl IntoIterator<Item = Relationship>) -> SocialGraph {
    let mut builder = GraphBuilder::new();
    let mut duplicates = 0;
    let mut self_loops = 0;
    for Relationship { source, target } in relationships {
        for vertex in [source, target] {
            if !builder.contains_vertex(vertex) {
                // ignore error because the vertex is known to be new
                let _ = builder.add_vertex_in_place(vertex);
            }
        }
        match builder.add_edge_in_place(source, target) {
            Ok(()) => {}
            Err(GraphBuilderError::DuplicateEdge { .. }) => duplicates += 1,
            Err(GraphBuilderError::SelfLoop { vertex }) => {
                log::debug!("Skipping self relationship of {vertex}");
                self_loops += 1;
            }
            Err(e) => log::warn!("Skipping relationship {source} -> {target}: {e}"),
        }
    }
    if duplicates > 0 || self_loops > 0 {
        log::info!("Collapsed {duplicates} duplicate relationships, skipped {self_loops} self relationships");
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn mutual_follows_collapse_to_one_edge() {
        let g = build_graph([
            Relationship { source: 1, target: 2 },
            Relationship { source: 2, target: 1 },
            Relationship { source: 1, target: 2 },
            Relationship { source: 3, target: 3 },
            Relationship { source: 2, target: 4 },
        ]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.node_count(), 4);
        assert!(g.contains_node(3));
        assert!(g.has_edge(2, 1));
    }

    #[test]
    fn reads_fetcher_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "source,target").unwrap();
        writeln!(f, "783214, 6253282").unwrap();
        writeln!(f, "6253282,783214").unwrap();
        let relationships = read_relationships_csv(&path).unwrap();
        assert_eq!(relationships, vec![
            Relationship { source: 783214, target: 6253282 },
            Relationship { source: 6253282, target: 783214 },
        ]);
    }

    #[test]
    fn reads_edge_list_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.edges");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "# ego 0\n236 186\n\n122 285").unwrap();
        let relationships = read_edge_list(&path).unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(relationships[1], Relationship { source: 122, target: 285 });
    }

    #[test]
    fn rejects_malformed_edge_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "1 2 3").unwrap();
        assert!(read_edge_list(&path).is_err());
    }
}
