//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use topomap_core::config::MapConfig;
use topomap_core::error::Result;
use topomap_core::TopologicalMap;

use super::macros::trace_command;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Map configuration from `--config` or the global config file
    pub fn map_config(&self) -> Result<MapConfig> {
        let config = MapConfig::discover(self.cli.config.as_deref())?;
        trace_command!(self.cli, self.start, "load_config");
        Ok(config)
    }

    /// Load and validate a map snapshot
    pub fn load_map(&self, path: &Path) -> Result<TopologicalMap> {
        let map = TopologicalMap::load_json(path)?;
        trace_command!(self.cli, self.start, "load_snapshot");
        Ok(map)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("topomap {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Inspect topological navigation maps recorded by exploring agents.");
        println!();
        println!("Run `topomap --help` for usage information.");
        Ok(())
    }
}
