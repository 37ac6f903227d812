//! Graph editing commands: `init`, `node`, `edge`, `show`, `clear`
//!
//! Every command loads the graph file, applies one change, and saves it back.

use serde::Serialize;
use serde_json::json;

use crate::commands::dispatch::CommandContext;
use crate::commands::format::{format_weight, output_by_format_result, print_json_status};
use graphstep_core::error::Result;
use graphstep_core::graph::{Graph, NodeId, Weight};
use graphstep_core::{bail_invalid, bail_usage};

/// Execute `graphstep init`
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = ctx.graph_path();
    if path.exists() && !force {
        bail_usage!(format!(
            "graph file {} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    ctx.save_graph(&Graph::new())?;
    tracing::info!(path = %path.display(), "initialized graph file");

    output_by_format_result!(ctx.cli.format,
        json => print_json_status("ok", &[("graph", json!(path.display().to_string()))]),
        human => {
            if !ctx.cli.quiet {
                println!("Initialized empty graph at {}", path.display());
            }
        }
    )
}

/// Execute `graphstep node add`
pub fn execute_node_add(ctx: &CommandContext, label: Option<&str>) -> Result<()> {
    let mut graph = ctx.load_graph()?;
    let id = match label {
        Some(label) => graph.add_node_with_label(checked_label(label)?)?,
        None => graph.add_node()?,
    };
    ctx.save_graph(&graph)?;

    output_by_format_result!(ctx.cli.format,
        json => print_json_status("ok", &[
            ("id", json!(id)),
            ("label", json!(graph.label_for(id))),
        ]),
        human => {
            println!("{}", id);
        }
    )
}

/// Execute `graphstep node label`
pub fn execute_node_label(ctx: &CommandContext, id: NodeId, label: &str) -> Result<()> {
    let label = checked_label(label)?;
    let mut graph = ctx.load_graph()?;
    graph.set_label(id, label)?;
    ctx.save_graph(&graph)?;

    output_by_format_result!(ctx.cli.format,
        json => print_json_status("ok", &[("id", json!(id)), ("label", json!(label))]),
        human => {
            if !ctx.cli.quiet {
                println!("Node {} is now labelled {}", id, label);
            }
        }
    )
}

fn checked_label(label: &str) -> Result<&str> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        bail_invalid!("label", format!("{:?}", label));
    }
    Ok(trimmed)
}

/// Execute `graphstep edge add`
///
/// Self-loops and already connected pairs are reported but are not errors.
pub fn execute_edge_add(ctx: &CommandContext, a: NodeId, b: NodeId, weight: Weight) -> Result<()> {
    let mut graph = ctx.load_graph()?;
    let added = graph.add_edge(a, b, weight)?;
    if added {
        ctx.save_graph(&graph)?;
    }

    output_by_format_result!(ctx.cli.format,
        json => print_json_status(if added { "added" } else { "skipped" }, &[
            ("a", json!(a)),
            ("b", json!(b)),
            ("weight", json!(weight)),
        ]),
        human => {
            if added {
                if !ctx.cli.quiet {
                    println!("Added edge {} - {} (weight {})", a, b, format_weight(weight));
                }
            } else {
                println!("Edge {} - {} not added (self-loop or duplicate)", a, b);
            }
        }
    )
}

/// Execute `graphstep show`
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let graph = ctx.load_graph()?;

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&graph_view(&graph))?);
            Ok(())
        },
        human => {
            print_graph_human(&graph);
        }
    )
}

#[derive(Debug, Serialize)]
struct NodeRow<'a> {
    id: NodeId,
    label: &'a str,
    degree: usize,
}

#[derive(Debug, Serialize)]
struct EdgeRow {
    a: NodeId,
    b: NodeId,
    weight: Weight,
}

/// Serializable view of the graph for `show --format json`
#[derive(Debug, Serialize)]
struct GraphView<'a> {
    nodes: Vec<NodeRow<'a>>,
    edges: Vec<EdgeRow>,
}

fn graph_view(graph: &Graph) -> GraphView<'_> {
    GraphView {
        nodes: graph
            .degrees()
            .into_iter()
            .map(|(id, label, degree)| NodeRow { id, label, degree })
            .collect(),
        edges: graph
            .edges()
            .iter()
            .map(|e| EdgeRow {
                a: e.a,
                b: e.b,
                weight: e.weight,
            })
            .collect(),
    }
}

fn print_graph_human(graph: &Graph) {
    if graph.is_empty() {
        println!("Graph is empty");
        return;
    }

    println!("Nodes ({}):", graph.node_count());
    for (id, label, degree) in graph.degrees() {
        println!("  {:>4}  {:<12} degree {}", id, label, degree);
    }

    println!();
    println!("Edges ({}):", graph.edges().len());
    for edge in graph.edges() {
        println!(
            "  {} - {}  weight {}",
            graph.label_for(edge.a),
            graph.label_for(edge.b),
            format_weight(edge.weight)
        );
    }
}

/// Execute `graphstep clear`
pub fn execute_clear(ctx: &CommandContext) -> Result<()> {
    let mut graph = ctx.load_graph()?;
    let removed = graph.node_count();
    graph.clear();
    ctx.save_graph(&graph)?;

    output_by_format_result!(ctx.cli.format,
        json => print_json_status("ok", &[("removed_nodes", json!(removed))]),
        human => {
            if !ctx.cli.quiet {
                println!("Cleared {} nodes", removed);
            }
        }
    )
}
