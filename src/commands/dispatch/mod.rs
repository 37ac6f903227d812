//! Command dispatch logic for graphstep

use std::time::Instant;

use crate::cli::Cli;
use graphstep_core::config::StepConfig;
use graphstep_core::error::Result;
use tracing::debug;

mod command;
mod commands;

use command::{Command, NoCommand};

pub use command::CommandContext;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = StepConfig::load()?;

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, &config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
