//! Command implementations for all graphstep commands

use crate::cli::{Commands, EdgeCommands, NodeCommands};
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{graph, run};
use graphstep_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init { force } => graph::execute_init(ctx, *force),
            Commands::Node { command } => match command {
                NodeCommands::Add { label } => graph::execute_node_add(ctx, label.as_deref()),
                NodeCommands::Label { id, label } => graph::execute_node_label(ctx, *id, label),
            },
            Commands::Edge { command } => match command {
                EdgeCommands::Add { a, b, weight } => {
                    graph::execute_edge_add(ctx, *a, *b, *weight)
                }
            },
            Commands::Show => graph::execute_show(ctx),
            Commands::Clear => graph::execute_clear(ctx),
            Commands::Dijkstra {
                start,
                end,
                run: args,
            } => run::dijkstra::execute(ctx, *start, *end, args),
            Commands::Prim { start, run: args } => run::prim::execute(ctx, *start, args),
        }
    }
}
