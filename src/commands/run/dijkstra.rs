//! `graphstep dijkstra` command

use super::human::{print_dijkstra_summary, HumanPrinter, Labels};
use super::json::dijkstra_json;
use super::{manual_hint, with_suspension};
use crate::cli::RunArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::output_by_format_result;
use graphstep_core::error::{GraphError, Result};
use graphstep_core::graph::algos::RunOutcome;
use graphstep_core::graph::NodeId;
use graphstep_core::session::Session;

/// Execute the dijkstra command
pub fn execute(
    ctx: &CommandContext,
    start: NodeId,
    end: Option<NodeId>,
    args: &RunArgs,
) -> Result<()> {
    let graph = ctx.load_graph()?;
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let mut session = Session::new(graph);
    session.pick_start(start)?;
    if let Some(end) = end {
        session.pick_end(end)?;
    }

    let labels = Labels::from_graph(session.graph());
    let mut printer = HumanPrinter::new(labels.clone(), ctx.streams_steps());

    let outcome = with_suspension(ctx, args, |pacing, mode, suspend| {
        manual_hint(ctx, mode);
        session.run_dijkstra(pacing, &mut printer, suspend)
    })?;

    let result = match outcome {
        RunOutcome::Completed(result) => result,
        RunOutcome::Cancelled => return Err(GraphError::Cancelled),
    };
    tracing::debug!(
        visited = result.visited.len(),
        elapsed = ?ctx.start.elapsed(),
        "dijkstra finished"
    );

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&dijkstra_json(&labels, &result))?);
            Ok(())
        },
        human => {
            print_dijkstra_summary(session.graph(), &result);
        }
    )
}
