//! Graphstep - watch shortest-path and spanning-tree algorithms step by step
//!
//! Build a weighted graph from the terminal, then run Dijkstra or Prim on it
//! in auto mode or one keypress at a time.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use graphstep_core::error::{ExitCode as GraphExitCode, GraphError};
use graphstep_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_format_json = wants_json_errors(env::args().skip(1));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap can fail before `Cli.format` exists, so JSON errors are
            // keyed off the raw arguments.
            if argv_format_json {
                if let Some(graph_error) = parse_error(&err) {
                    eprintln!("{}", graph_error.to_json());
                    return ExitCode::from(graph_error.exit_code() as u8);
                }
            }
            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(GraphExitCode::Success as u8),
        Err(e) => {
            report_error(&cli, &e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Print a failed command on stderr in the requested format.
///
/// A cancelled run is an expected way to stop stepping, so human output
/// reports it without the `error:` prefix.
fn report_error(cli: &Cli, error: &GraphError) {
    if cli.format == OutputFormat::Json {
        eprintln!("{}", error.to_json());
        return;
    }
    if cli.quiet {
        return;
    }
    match error {
        GraphError::Cancelled => {
            tracing::info!("run stopped before completion");
            eprintln!("run cancelled");
        }
        other => eprintln!("error: {}", other),
    }
}

/// Map a clap failure onto the graphstep error categories.
///
/// `None` for help and version requests, which are not failures.
fn parse_error(err: &clap::Error) -> Option<GraphError> {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => Some(GraphError::UsageError(err.to_string())),
        _ => Some(GraphError::Other(err.to_string())),
    }
}

/// Whether `--format json` appears in the raw arguments
fn wants_json_errors(args: impl IntoIterator<Item = String>) -> bool {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                if args.next().is_some_and(|v| v == "json") {
                    return true;
                }
            }
            "--format=json" => return true,
            "--" => return false,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_error_categories() {
        let err = Cli::try_parse_from(["graphstep", "prim", "0", "--manual", "--no-pause"])
            .unwrap_err();
        let mapped = parse_error(&err).unwrap();
        assert_eq!(mapped.exit_code() as i32, 2);

        let help = Cli::try_parse_from(["graphstep", "--help"]).unwrap_err();
        assert!(parse_error(&help).is_none());
    }

    #[test]
    fn test_wants_json_errors() {
        assert!(wants_json_errors(argv(&["--format", "json", "show"])));
        assert!(wants_json_errors(argv(&["prim", "0", "--format=json"])));
        assert!(!wants_json_errors(argv(&["--format", "human", "show"])));
        assert!(!wants_json_errors(argv(&["node", "label", "0", "--", "--format=json"])));
    }
}
