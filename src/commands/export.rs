//! `topomap export` command - dump the map as a directed graph

use std::fs;

use crate::cli::commands::ExportArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use topomap_core::bail_usage;
use topomap_core::error::{Result, TopoMapError};

/// Execute the export command
pub fn execute(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
    if args.dot && ctx.cli.format == OutputFormat::Json {
        bail_usage!("--dot cannot be combined with --format json");
    }

    let map = ctx.load_map(&args.snapshot)?;
    let graph = map.to_digraph();
    let rendered = if args.dot {
        graph.to_dot()
    } else {
        let mut json = serde_json::to_string_pretty(&graph)?;
        json.push('\n');
        json
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .map_err(|e| TopoMapError::io_operation("write export", path.display(), e))?;
            if !ctx.cli.quiet && ctx.cli.format == OutputFormat::Human {
                println!(
                    "Exported {} landmarks and {} edges to {}",
                    graph.nodes.len(),
                    graph.edges.len(),
                    path.display()
                );
            }
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
