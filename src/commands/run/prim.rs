//! `graphstep prim` command

use super::human::{print_mst_summary, HumanPrinter, Labels};
use super::json::prim_json;
use super::{manual_hint, with_suspension};
use crate::cli::RunArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::output_by_format_result;
use graphstep_core::error::{GraphError, Result};
use graphstep_core::graph::algos::RunOutcome;
use graphstep_core::graph::NodeId;
use graphstep_core::session::Session;

/// Execute the prim command
pub fn execute(ctx: &CommandContext, start: NodeId, args: &RunArgs) -> Result<()> {
    let graph = ctx.load_graph()?;
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    let node_count = graph.node_count();

    let mut session = Session::new(graph);
    session.pick_start(start)?;

    let labels = Labels::from_graph(session.graph());
    let mut printer = HumanPrinter::new(labels, ctx.streams_steps());

    let outcome = with_suspension(ctx, args, |pacing, mode, suspend| {
        manual_hint(ctx, mode);
        session.run_prim(pacing, &mut printer, suspend)
    })?;

    let RunOutcome::Completed(result) = outcome else {
        return Err(GraphError::Cancelled);
    };
    if !result.spans(node_count) {
        tracing::info!(
            covered = result.visited.len(),
            node_count,
            "graph is disconnected"
        );
    }

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&prim_json(&result, node_count))?);
            Ok(())
        },
        human => {
            print_mst_summary(session.graph(), &result);
        }
    )
}
