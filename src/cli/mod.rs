//! CLI argument parsing for graphstep
//!
//! Global flags: --graph, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{EdgeCommands, NodeCommands, RunArgs};
pub use output::OutputFormat;

/// Graphstep - step through Dijkstra and Prim on a graph you build
#[derive(Parser, Debug)]
#[command(name = "graphstep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Graph file (defaults to the configured graph file, then graph.toml)
    #[arg(long, global = true, env = "GRAPHSTEP_GRAPH")]
    pub graph: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty graph file
    Init {
        /// Overwrite an existing graph file
        #[arg(long)]
        force: bool,
    },

    /// Add or rename nodes
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Add edges
    Edge {
        #[command(subcommand)]
        command: EdgeCommands,
    },

    /// Show nodes with their degrees, then edges
    Show,

    /// Remove every node and edge
    Clear,

    /// Run Dijkstra's shortest-path algorithm
    Dijkstra {
        /// Start node id
        start: u32,

        /// Stop once this node is settled and report the path to it
        #[arg(long)]
        end: Option<u32>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run Prim's minimum-spanning-tree algorithm
    Prim {
        /// Start node id
        start: u32,

        #[command(flatten)]
        run: RunArgs,
    },
}
