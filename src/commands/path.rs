//! `topomap path` command - cheapest route between two landmarks

use serde_json::json;

use crate::cli::commands::PathArgs;
use crate::cli::format::{output_by_format_result, print_json};
use crate::commands::dispatch::CommandContext;
use topomap_core::error::Result;

/// Execute the path command
pub fn execute(ctx: &CommandContext, args: &PathArgs) -> Result<()> {
    let map = ctx.load_map(&args.snapshot)?;
    let from = args.from.unwrap_or(map.curr_landmark_idx());

    let paths = map.shortest_paths(from)?;
    let route = map.get_path(from, args.to)?;
    let cost = route
        .as_ref()
        .and_then(|_| paths.distance(args.to))
        .map(|c| c.value());

    output_by_format_result!(ctx.cli.format,
        json => print_json(&json!({
            "from": from,
            "to": args.to,
            "path": route,
            "hops": route.as_ref().map(|p| p.len() - 1),
            "cost": cost,
        })),
        human => {
            match (&route, cost) {
                (Some(path), Some(cost)) => {
                    let hops: Vec<String> = path.iter().map(|i| i.to_string()).collect();
                    println!("{}", hops.join(" -> "));
                    if !ctx.cli.quiet {
                        println!("{} hops, cost {:.2}", path.len() - 1, cost);
                    }
                }
                _ => println!("no path from {} to {}", from, args.to),
            }
        }
    )
}
