//! Algorithm commands: `dijkstra` and `prim`
//!
//! Both load the graph into a [`Session`](graphstep_core::session::Session),
//! pick the endpoints, and run under a suspension chosen from the run flags.

pub mod dijkstra;
pub mod prim;

mod driver;
mod human;
mod json;

use crate::cli::RunArgs;
use crate::commands::dispatch::CommandContext;
use graphstep_core::error::Result;
use graphstep_core::step::{Immediate, Pacing, StepController, StepMode, Suspend};

/// Pacing from `--pacing`, else the configured default
fn pacing_for(ctx: &CommandContext, args: &RunArgs) -> Pacing {
    args.pacing
        .map(Pacing::from_millis)
        .unwrap_or_else(|| ctx.config.pacing())
}

fn mode_for(ctx: &CommandContext, args: &RunArgs) -> StepMode {
    if args.manual {
        StepMode::Manual
    } else {
        ctx.config.mode
    }
}

/// Key help for manual runs, on stderr so stdout stays the step stream
fn manual_hint(ctx: &CommandContext, mode: StepMode) {
    if mode == StepMode::Manual && ctx.streams_steps() {
        eprintln!("manual stepping: enter or n = next, a = auto, m = manual, q = quit");
    }
}

/// Run `body` under the suspension the flags ask for.
///
/// `--no-pause` runs straight through. Otherwise a [`StepController`] paces
/// the run; stdin and Ctrl-C drive it through cloned handles.
fn with_suspension<T>(
    ctx: &CommandContext,
    args: &RunArgs,
    body: impl FnOnce(Pacing, StepMode, &mut dyn Suspend) -> Result<T>,
) -> Result<T> {
    let pacing = pacing_for(ctx, args);

    if args.no_pause {
        return body(pacing, StepMode::Auto, &mut Immediate);
    }

    let mode = mode_for(ctx, args);
    let (mut controller, handle) = StepController::new(mode);

    let interrupt = handle.clone();
    if let Err(e) = ctrlc::set_handler(move || interrupt.cancel()) {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
    }

    if let Err(e) = driver::spawn(handle.clone()) {
        tracing::warn!(error = %e, "failed to start stdin driver");
        if mode == StepMode::Manual {
            handle.set_mode(StepMode::Auto);
        }
    }

    tracing::debug!(pacing_ms = pacing.as_millis(), %mode, "starting stepped run");
    let result = body(pacing, mode, &mut controller);
    drop(handle);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use graphstep_core::config::StepConfig;
    use std::time::Instant;

    fn run_args(cli: &Cli) -> RunArgs {
        match &cli.command {
            Some(crate::cli::Commands::Prim { run, .. }) => run.clone(),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["graphstep", "prim", "0", "--pacing", "5", "--manual"])
            .unwrap();
        let config = StepConfig::default();
        let ctx = CommandContext::new(&cli, &config, Instant::now());
        let args = run_args(&cli);

        assert_eq!(pacing_for(&ctx, &args).as_millis(), 10);
        assert_eq!(mode_for(&ctx, &args), StepMode::Manual);
    }

    #[test]
    fn test_config_supplies_defaults() {
        let cli = Cli::try_parse_from(["graphstep", "prim", "0"]).unwrap();
        let config = StepConfig {
            pacing_ms: 750,
            mode: StepMode::Manual,
            ..StepConfig::default()
        };
        let ctx = CommandContext::new(&cli, &config, Instant::now());
        let args = run_args(&cli);

        assert_eq!(pacing_for(&ctx, &args).as_millis(), 750);
        assert_eq!(mode_for(&ctx, &args), StepMode::Manual);
    }
}
