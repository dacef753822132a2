//! Reader for SNAP ego-network directories.
//!
//! Every ego `<id>` contributes four files:
//!
//! - `<id>.featnames`: one line per local feature, `<local> <name>;<anonymized value>`
//! - `<id>.feat`: one line per alter, `<node> <0/1 per local feature>`
//! - `<id>.egofeat`: the ego's own `0/1` values
//! - `<id>.edges`: alter-alter edges, one `<a> <b>` pair per line
//!
//! Local features map onto a global [`FeatureIndex`] built from all
//! `.featnames` files. Node vectors store `value + 1` per global slot, so `0`
//! marks a feature the node's ego network never described.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::errors::FeatureIndexError;
use crate::graph::{NodeFeatures, NodeId, SocialGraph};
use super::relationships::{build_graph, read_edge_list, Relationship};

static EGO_FILE: OnceLock<regex::Regex> = OnceLock::new();

/// Splits a featname line into its anonymized index and feature name.
///
/// `"0 birthday;anonymized feature 376"` gives `(376, "birthday")`.
pub fn parse_featname_line(line: &str) -> Result<(usize, String), FeatureIndexError> {
    let malformed = || FeatureIndexError::MalformedFeatureName { line: line.to_string() };
    let (_, rest) = line.trim().split_once(' ').ok_or_else(malformed)?;
    let (name, value) = rest.rsplit_once(';').ok_or_else(malformed)?;
    let index = value.split(' ')
        .last()
        .and_then(|x| x.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    Ok((index, name.to_string()))
}

/// Global feature numbering shared by all egos of a dataset.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FeatureIndex {
    names: BTreeMap<usize, String>,
    inverted: BTreeMap<String, Vec<usize>>,
}

impl FeatureIndex {
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, String)>) -> Self {
        let names = entries.into_iter().collect::<BTreeMap<_, _>>();
        let mut inverted: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, name) in &names {
            inverted.entry(name.clone()).or_default().push(*index);
        }
        Self { names, inverted }
    }

    pub fn from_featnames_files(files: impl IntoIterator<Item = PathBuf>) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        for file in files {
            for line in std::fs::read_to_string(&file)?.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                entries.push(parse_featname_line(line)?);
            }
        }
        Ok(Self::from_entries(entries))
    }

    /// Length of the node feature vectors.
    pub fn dimension(&self) -> usize {
        self.names.keys().next_back().map(|max| max + 1).unwrap_or(0)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    pub fn indices_of(&self, name: &str) -> &[usize] {
        self.inverted.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Graph and node features of one or more ego networks.
#[derive(Debug, Clone)]
pub struct EgoNetwork {
    pub index: FeatureIndex,
    pub graph: SocialGraph,
    pub features: NodeFeatures,
}

impl EgoNetwork {
    /// Graph with the node features attached.
    pub fn into_graph(self) -> SocialGraph {
        let mut graph = self.graph;
        let attached = graph.attach_features(self.features);
        log::debug!("Attached feature vectors to {attached} nodes");
        graph
    }
}

/// Ego ids with an `.egofeat` file in `directory`, ascending.
pub fn discover_egos(directory: impl AsRef<Path>) -> anyhow::Result<Vec<NodeId>> {
    let pattern = EGO_FILE.get_or_init(
        || regex::Regex::new(r"^(\d+)\.egofeat$").expect("Invalid Regex")
    );
    let mut egos = Vec::new();
    for result in std::fs::read_dir(directory.as_ref())? {
        let entry = result?;
        if !entry.metadata()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(captures) = pattern.captures(name) {
            egos.push(captures[1].parse()?);
        }
    }
    egos.sort_unstable();
    Ok(egos)
}

fn ego_file(directory: &Path, ego: NodeId, extension: &str) -> PathBuf {
    directory.join(format!("{ego}.{extension}"))
}

fn parse_values(line: &str) -> anyhow::Result<Vec<u8>> {
    line.split_whitespace()
        .map(|x| x.parse::<u8>().map_err(anyhow::Error::from))
        .collect()
}

fn merge_features(features: &mut NodeFeatures,
                  dimension: usize,
                  node: NodeId,
                  keys: &[usize],
                  values: &[u8]) -> Result<(), FeatureIndexError>
{
    if keys.len() != values.len() {
        return Err(FeatureIndexError::FeatureCountMismatch {
            node, found: values.len(), expected: keys.len()
        });
    }
    let vector = features.entry(node).or_insert_with(|| vec![0.0; dimension]);
    for (&key, &value) in keys.iter().zip(values) {
        if key >= dimension {
            return Err(FeatureIndexError::FeatureIndexOutOfRange { index: key, dimension });
        }
        let encoded = value as f64 + 1.0;
        if encoded > vector[key] {
            vector[key] = encoded;
        }
    }
    Ok(())
}

/// Feature vectors of every ego and alter in the given ego networks.
/// A node appearing in several networks keeps the slot-wise maximum.
pub fn load_node_features(directory: impl AsRef<Path>,
                          egos: &[NodeId],
                          index: &FeatureIndex) -> anyhow::Result<NodeFeatures>
{
    let directory = directory.as_ref();
    let dimension = index.dimension();
    let mut features = HashMap::new();
    for &ego in egos {
        let keys = std::fs::read_to_string(ego_file(directory, ego, "featnames"))?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| parse_featname_line(line).map(|(key, _)| key))
            .collect::<Result<Vec<_>, _>>()?;

        let ego_values = parse_values(&std::fs::read_to_string(ego_file(directory, ego, "egofeat"))?)?;
        merge_features(&mut features, dimension, ego, &keys, &ego_values)?;

        let mut alters = 0;
        for line in std::fs::read_to_string(ego_file(directory, ego, "feat"))?.lines() {
            let Some((node, values)) = line.trim().split_once(' ') else { continue };
            merge_features(&mut features, dimension, node.parse()?, &keys, &parse_values(values)?)?;
            alters += 1;
        }
        log::debug!("Ego {ego}: {} local features, {alters} alters", keys.len());
    }
    Ok(features)
}

/// Loads the ego networks of `egos` (all egos in the directory when `None`).
///
/// The ego is connected to each of its alters, and alters are connected as
/// listed in the `.edges` file.
pub fn load_ego_network(directory: impl AsRef<Path>, egos: Option<&[NodeId]>) -> anyhow::Result<EgoNetwork> {
    let directory = directory.as_ref();
    let egos = match egos {
        Some(egos) => egos.to_vec(),
        None => discover_egos(directory)?,
    };
    let all_egos = discover_egos(directory)?;
    let index = FeatureIndex::from_featnames_files(
        all_egos.iter().map(|ego| ego_file(directory, *ego, "featnames"))
    )?;
    log::info!("Feature index: {} features over {} egos", index.len(), all_egos.len());

    let features = load_node_features(directory, &egos, &index)?;

    let mut relationships = Vec::new();
    for &ego in &egos {
        let alters = std::fs::read_to_string(ego_file(directory, ego, "feat"))?
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(|x| x.parse::<NodeId>())
            .collect::<Result<Vec<_>, _>>()?;
        relationships.extend(alters.into_iter().map(|alter| Relationship { source: ego, target: alter }));
        relationships.extend(read_edge_list(ego_file(directory, ego, "edges"))?);
    }
    let graph = build_graph(relationships);
    log::info!(
        "Loaded {} ego networks: {} nodes, {} edges",
        egos.len(), graph.node_count(), graph.edge_count()
    );
    Ok(EgoNetwork { index, graph, features })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn sample_directory() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        write(p, "0.featnames", "0 birthday;anonymized feature 0\n1 gender;anonymized feature 2\n");
        write(p, "0.egofeat", "1 0\n");
        write(p, "0.feat", "1 0 1\n2 1 1\n");
        write(p, "0.edges", "1 2\n");
        write(p, "5.featnames", "0 gender;anonymized feature 2\n1 locale;anonymized feature 3\n");
        write(p, "5.egofeat", "0 1\n");
        write(p, "5.feat", "2 0 1\n");
        write(p, "5.edges", "");
        write(p, "notes.txt", "not an ego file");
        dir
    }

    #[test]
    fn parses_featname_lines() {
        assert_eq!(
            parse_featname_line("0 birthday;anonymized feature 376").unwrap(),
            (376, "birthday".to_string())
        );
        assert_eq!(
            parse_featname_line("12 education;classes;id;anonymized feature 10").unwrap(),
            (10, "education;classes;id".to_string())
        );
        assert!(parse_featname_line("garbage").is_err());
        assert!(parse_featname_line("0 no separator 3").is_err());
    }

    #[test]
    fn index_is_global_and_invertible() {
        let index = FeatureIndex::from_entries([
            (0, "birthday".to_string()),
            (2, "gender".to_string()),
            (3, "gender".to_string()),
        ]);
        assert_eq!(index.dimension(), 4);
        assert_eq!(index.len(), 3);
        assert_eq!(index.name(2), Some("gender"));
        assert_eq!(index.indices_of("gender"), &[2, 3]);
        assert!(index.indices_of("locale").is_empty());
    }

    #[test]
    fn discovers_egos_by_file_name() {
        let dir = sample_directory();
        assert_eq!(discover_egos(dir.path()).unwrap(), vec![0, 5]);
    }

    #[test]
    fn features_take_the_slot_wise_maximum() {
        let dir = sample_directory();
        let network = load_ego_network(dir.path(), None).unwrap();
        assert_eq!(network.index.dimension(), 4);
        // ego 0: birthday=1, gender=0
        assert_eq!(network.features[&0], vec![2.0, 0.0, 1.0, 0.0]);
        // node 2 appears in both networks: gender=1 from ego 0, locale=1 from ego 5
        assert_eq!(network.features[&2], vec![2.0, 0.0, 2.0, 2.0]);
        assert_eq!(network.features[&5], vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn ego_connects_to_its_alters() {
        let dir = sample_directory();
        let network = load_ego_network(dir.path(), Some([0].as_slice())).unwrap();
        let graph = network.into_graph();
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(0, 2));
        assert!(graph.has_edge(1, 2));
        assert!(!graph.contains_node(5));
        assert_eq!(graph.node_features(1), Some([1.0, 0.0, 2.0, 0.0].as_slice()));
    }

    #[test]
    fn feature_count_mismatch_is_reported() {
        let dir = sample_directory();
        write(dir.path(), "5.feat", "2 0 1 1\n");
        let err = load_ego_network(dir.path(), Some([5].as_slice())).unwrap_err();
        let err = err.downcast::<FeatureIndexError>().unwrap();
        assert!(matches!(err, FeatureIndexError::FeatureCountMismatch { node: 2, found: 3, expected: 2 }));
    }
}
