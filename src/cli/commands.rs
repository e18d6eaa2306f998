//! Subcommands and their argument structures

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::parse::{parse_traversal_mode, parse_unit_interval};
use topomap_core::map::TraversalMode;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a session log into a map
    Replay(ReplayArgs),

    /// Show landmark and edge counts of a snapshot
    Stats(SnapshotArgs),

    /// Find the cheapest path between two landmarks
    Path(PathArgs),

    /// List landmarks reachable from a start landmark
    Reachable(ReachableArgs),

    /// Prune unreliable edges and random landmarks from a snapshot
    Prune(PruneArgs),

    /// Export a snapshot as a directed graph
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Newline-delimited JSON session log
    pub log: PathBuf,

    /// Write the resulting map snapshot here
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Build a directed map regardless of configuration
    #[arg(long)]
    pub directed: bool,

    /// Apply only traversals recorded in these modes (repeatable)
    #[arg(long, value_parser = parse_traversal_mode, action = clap::ArgAction::Append)]
    pub only_mode: Vec<TraversalMode>,
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Map snapshot (JSON)
    pub snapshot: PathBuf,
}

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Map snapshot (JSON)
    pub snapshot: PathBuf,

    /// Start landmark (defaults to the current landmark)
    #[arg(long)]
    pub from: Option<usize>,

    /// Target landmark
    #[arg(long)]
    pub to: usize,
}

#[derive(Args, Debug)]
pub struct ReachableArgs {
    /// Map snapshot (JSON)
    pub snapshot: PathBuf,

    /// Start landmark (defaults to the current landmark)
    #[arg(long)]
    pub from: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Map snapshot (JSON)
    pub snapshot: PathBuf,

    /// Remove edges with reliability below this score
    #[arg(long, value_parser = parse_unit_interval::<f32>)]
    pub edge_threshold: Option<f32>,

    /// Probability of removing each non-current landmark
    #[arg(long, value_parser = parse_unit_interval::<f64>)]
    pub vertex_chance: Option<f64>,

    /// Seed for vertex pruning
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the pruned snapshot here instead of overwriting the input
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Report what would be pruned without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Map snapshot (JSON)
    pub snapshot: PathBuf,

    /// Emit Graphviz DOT instead of JSON
    #[arg(long)]
    pub dot: bool,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
