//! Command implementations for all topomap commands

use crate::cli::Commands;
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use topomap_core::error::Result;

use super::macros::trace_command;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Replay(args) => commands::replay::execute(ctx, args),
            Commands::Stats(args) => commands::stats::execute(ctx, args),
            Commands::Path(args) => commands::path::execute(ctx, args),
            Commands::Reachable(args) => commands::reachable::execute(ctx, args),
            Commands::Prune(args) => commands::prune::execute(ctx, args),
            Commands::Export(args) => commands::export::execute(ctx, args),
        };
        trace_command!(ctx.cli, ctx.start, "execute_command");
        result
    }
}
