//! `topomap prune` command - drop unreliable edges and random landmarks

use serde_json::json;
use tracing::info;

use crate::cli::commands::PruneArgs;
use crate::cli::format::{output_by_format_result, print_json};
use crate::commands::dispatch::CommandContext;
use topomap_core::error::Result;
use topomap_core::map::pruning_rng;

/// Execute the prune command.
///
/// Flags override the pruning settings stored in the snapshot's config.
pub fn execute(ctx: &CommandContext, args: &PruneArgs) -> Result<()> {
    let mut map = ctx.load_map(&args.snapshot)?;

    let mut pruning = map.config().pruning;
    if let Some(threshold) = args.edge_threshold {
        pruning.edge_threshold = threshold;
    }
    if let Some(chance) = args.vertex_chance {
        pruning.vertex_chance = chance;
    }
    if args.seed.is_some() {
        pruning.seed = args.seed;
    }

    let before = map.num_landmarks();
    let mut rng = pruning_rng(&pruning);
    let report = map.prune(pruning.edge_threshold, pruning.vertex_chance, &mut rng)?;
    info!(
        edges = report.edges_removed,
        landmarks = report.vertices_removed.len(),
        "pruned snapshot"
    );

    let target = args.output.as_ref().unwrap_or(&args.snapshot);
    if !args.dry_run {
        map.save_json(target)?;
    }

    output_by_format_result!(ctx.cli.format,
        json => print_json(&json!({
            "edge_threshold": pruning.edge_threshold,
            "vertex_chance": pruning.vertex_chance,
            "seed": pruning.seed,
            "report": report,
            "landmarks_before": before,
            "landmarks_after": map.num_landmarks(),
            "written": (!args.dry_run).then(|| target.display().to_string()),
        })),
        human => {
            println!(
                "Removed {} edges and {} landmarks ({} -> {} live)",
                report.edges_removed,
                report.vertices_removed.len(),
                before,
                map.num_landmarks()
            );
            if !ctx.cli.quiet {
                if !report.vertices_removed.is_empty() {
                    let removed: Vec<String> =
                        report.vertices_removed.iter().map(|i| i.to_string()).collect();
                    println!("Pruned landmarks: {}", removed.join(" "));
                }
                if args.dry_run {
                    println!("Dry run, nothing written");
                } else {
                    println!("Snapshot written to {}", target.display());
                }
            }
        }
    )
}
