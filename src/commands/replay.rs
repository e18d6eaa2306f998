//! `topomap replay` command - rebuild a map from a session log

use std::fs::File;
use std::io::BufReader;

use serde_json::json;
use tracing::info;

use crate::cli::commands::ReplayArgs;
use crate::cli::format::{output_by_format_result, print_json};
use crate::commands::dispatch::CommandContext;
use topomap_core::error::{Result, TopoMapError};
use topomap_core::map::{AcceptAll, ModeFilter, TraversalFilter};
use topomap_core::session::SessionReplayer;

/// Execute the replay command
pub fn execute(ctx: &CommandContext, args: &ReplayArgs) -> Result<()> {
    let mut config = ctx.map_config()?;
    if args.directed {
        config.directed = true;
    }

    let file = File::open(&args.log)
        .map_err(|e| TopoMapError::io_operation("open session log", args.log.display(), e))?;

    let mode_filter = ModeFilter::new(args.only_mode.iter().copied());
    let filter: &dyn TraversalFilter = if args.only_mode.is_empty() {
        &AcceptAll
    } else {
        &mode_filter
    };

    let mut replayer = SessionReplayer::new(config, filter);
    replayer.replay(BufReader::new(file))?;
    let (map, stats) = replayer.finish()?;
    info!(events = stats.events, landmarks = map.num_landmarks(), "replayed session");

    if let Some(output) = &args.output {
        map.save_json(output)?;
    }

    output_by_format_result!(ctx.cli.format,
        json => print_json(&json!({
            "log": args.log.display().to_string(),
            "directed": map.is_directed(),
            "landmarks": map.num_landmarks(),
            "edges": map.num_edges(),
            "current": map.curr_landmark_idx(),
            "stats": stats,
            "output": args.output.as_ref().map(|p| p.display().to_string()),
        })),
        human => {
            if !ctx.cli.quiet {
                println!(
                    "Replayed {} events: {} landmarks, {} edges, current landmark {}",
                    stats.events,
                    map.num_landmarks(),
                    map.num_edges(),
                    map.curr_landmark_idx()
                );
                println!(
                    "Traversals: {} applied, {} skipped",
                    stats.traversals_applied, stats.traversals_skipped
                );
                if stats.edges_pruned > 0 || stats.vertices_pruned > 0 {
                    println!(
                        "Pruned: {} edges, {} landmarks",
                        stats.edges_pruned, stats.vertices_pruned
                    );
                }
                if let Some(output) = &args.output {
                    println!("Snapshot written to {}", output.display());
                }
            }
        }
    )
}
