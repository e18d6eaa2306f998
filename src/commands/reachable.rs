//! `topomap reachable` command - landmarks reachable from a start

use serde_json::json;

use crate::cli::commands::ReachableArgs;
use crate::cli::format::{output_by_format_result, print_json};
use crate::commands::dispatch::CommandContext;
use topomap_core::error::Result;

/// Execute the reachable command
pub fn execute(ctx: &CommandContext, args: &ReachableArgs) -> Result<()> {
    let map = ctx.load_map(&args.snapshot)?;
    let from = args.from.unwrap_or(map.curr_landmark_idx());
    let reachable = map.reachable_indices(from)?;
    let unreachable: Vec<usize> = map
        .live_indices()
        .into_iter()
        .filter(|i| reachable.binary_search(i).is_err())
        .collect();

    output_by_format_result!(ctx.cli.format,
        json => print_json(&json!({
            "from": from,
            "reachable": reachable,
            "unreachable": unreachable,
        })),
        human => {
            let listed: Vec<String> = reachable.iter().map(|i| i.to_string()).collect();
            println!("{}", listed.join(" "));
            if !ctx.cli.quiet && !unreachable.is_empty() {
                println!("{} landmarks unreachable from {}", unreachable.len(), from);
            }
        }
    )
}
