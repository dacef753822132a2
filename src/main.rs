use std::path::PathBuf;
use clap::Parser;
use link_features::NodeId;

mod commands;
mod output_schema;
mod statistics;

#[derive(clap::Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Extract(ExtractCommand),
    NodeFeatures(NodeFeaturesCommand),
    Communities(CommunitiesCommand),
}

/// Compute link features for labeled candidate pairs.
#[derive(clap::Args)]
struct ExtractCommand {
    /// Relationship file (`source,target` CSV or whitespace edge list)
    #[clap(short, long)]
    graph: PathBuf,

    /// `u,v,label` CSV of candidate pairs
    #[clap(short, long)]
    pairs: PathBuf,

    #[clap(short, long)]
    output: PathBuf,

    /// Append the community ids of both endpoints
    #[clap(short, long)]
    with_communities: bool,
}

/// Load node feature vectors from a SNAP ego-network directory.
#[derive(clap::Args)]
struct NodeFeaturesCommand {
    #[clap(short, long)]
    directory: PathBuf,

    /// Egos to load; all egos in the directory when omitted
    #[clap(short, long, num_args = 1..)]
    egos: Vec<NodeId>,

    #[clap(short, long)]
    output: PathBuf,
}

/// Detect communities and summarise degree centrality.
#[derive(clap::Args)]
struct CommunitiesCommand {
    #[clap(short, long)]
    graph: PathBuf,

    #[clap(short, long)]
    output: PathBuf,
}


fn setup_logging() -> anyhow::Result<flexi_logger::LoggerHandle> {
    let spec = flexi_logger::LogSpecification::parse("warn,link_features=debug")?;
    let handle = flexi_logger::Logger::with(spec)
        .log_to_file(
            flexi_logger::FileSpec::default()
                .directory("logs")
                .basename("link-features")
                .use_timestamp(false),
        )
        .duplicate_to_stdout(flexi_logger::Duplicate::Info)
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stdout(flexi_logger::colored_detailed_format)
        .set_palette("b1;3;2;4;6".to_string())
        .start()?;
    Ok(handle)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logger = setup_logging()?;

    match cli.command {
        Command::Extract(extract) => {
            commands::extract::extract_link_features(
                extract.graph, extract.pairs, extract.output, extract.with_communities
            )?;
        }
        Command::NodeFeatures(load) => {
            commands::node_features::load_node_features(load.directory, load.egos, load.output)?;
        }
        Command::Communities(communities) => {
            commands::communities::compute_communities(communities.graph, communities.output)?;
        }
    }

    Ok(())
}
