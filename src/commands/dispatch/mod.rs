//! Command dispatch logic for topomap

use std::time::Instant;

use crate::cli::Cli;
use topomap_core::error::Result;

mod command;
mod commands;
mod macros;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::new(cli, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
