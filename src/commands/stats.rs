//! `topomap stats` command - summarize a map snapshot

use serde::Serialize;

use crate::cli::commands::SnapshotArgs;
use crate::cli::format::{output_by_format_result, print_json};
use crate::commands::dispatch::CommandContext;
use topomap_core::error::Result;
use topomap_core::TopologicalMap;

#[derive(Debug, Serialize)]
struct MapStats {
    directed: bool,
    landmarks: usize,
    pruned_landmarks: usize,
    edges: usize,
    current: usize,
    current_hash: String,
    min_reliability: Option<f32>,
    mean_reliability: Option<f32>,
    failures: u64,
}

impl MapStats {
    fn collect(map: &TopologicalMap) -> Self {
        let costs = map.config().cost;
        let edges: Vec<_> = map
            .landmarks()
            .flat_map(|(index, _)| map.neighbors(index).unwrap_or(&[]))
            .collect();

        let scores: Vec<f32> = edges.iter().map(|e| e.reliability(&costs)).collect();
        let min_reliability = scores.iter().copied().reduce(f32::min);
        let mean_reliability =
            (!scores.is_empty()).then(|| scores.iter().sum::<f32>() / scores.len() as f32);

        Self {
            directed: map.is_directed(),
            landmarks: map.num_landmarks(),
            pruned_landmarks: map.num_slots() - map.num_landmarks(),
            edges: map.num_edges(),
            current: map.curr_landmark_idx(),
            current_hash: map.curr_landmark().hash().to_string(),
            min_reliability,
            mean_reliability,
            failures: edges.iter().map(|e| u64::from(e.failures)).sum(),
        }
    }
}

/// Execute the stats command
pub fn execute(ctx: &CommandContext, args: &SnapshotArgs) -> Result<()> {
    let map = ctx.load_map(&args.snapshot)?;
    let stats = MapStats::collect(&map);

    output_by_format_result!(ctx.cli.format,
        json => print_json(&stats),
        human => {
            let kind = if stats.directed { "directed" } else { "undirected" };
            println!("Map: {} ({})", args.snapshot.display(), kind);
            println!(
                "Landmarks: {} live, {} pruned",
                stats.landmarks, stats.pruned_landmarks
            );
            println!("Edges: {}", stats.edges);
            println!(
                "Current landmark: {} [{}]",
                stats.current,
                map.curr_landmark().hash().short()
            );
            if let (Some(min), Some(mean)) = (stats.min_reliability, stats.mean_reliability) {
                println!("Reliability: min {:.3}, mean {:.3}", min, mean);
            }
            if !ctx.cli.quiet {
                println!("Recorded failures: {}", stats.failures);
            }
        }
    )
}
