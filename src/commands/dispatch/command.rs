//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use graphstep_core::config::StepConfig;
use graphstep_core::error::Result;
use graphstep_core::graph::Graph;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: &'a StepConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: &'a StepConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// Graph file from `--graph`, falling back to the configured one
    pub fn graph_path(&self) -> PathBuf {
        self.cli
            .graph
            .clone()
            .unwrap_or_else(|| self.config.graph_file.clone())
    }

    pub fn load_graph(&self) -> Result<Graph> {
        let graph = Graph::load(&self.graph_path())?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "load_graph");
        Ok(graph)
    }

    pub fn save_graph(&self, graph: &Graph) -> Result<()> {
        graph.save(&self.graph_path())
    }

    pub fn is_json(&self) -> bool {
        self.cli.format == OutputFormat::Json
    }

    /// Whether per-step progress lines should be printed
    pub fn streams_steps(&self) -> bool {
        !self.is_json() && !self.cli.quiet
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
        println!("graphstep {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Step through Dijkstra and Prim on a graph you build.");
        println!();
        println!("Run `graphstep --help` for usage information.");
        Ok(())
    }
}
