//! Human-readable step stream and run summaries

use std::collections::BTreeMap;

use crate::commands::format::{format_distance, format_weight};
use graphstep_core::graph::algos::{
    DijkstraResult, MstResult, MstStep, Snapshot, TraversalCallbacks,
};
use graphstep_core::graph::{Graph, NodeId, NodeState};

/// Node labels captured before the run, so lines can be printed while the
/// session holds the graph
#[derive(Debug, Clone, Default)]
pub(super) struct Labels(BTreeMap<NodeId, String>);

impl Labels {
    pub(super) fn from_graph(graph: &Graph) -> Self {
        Self(
            graph
                .nodes()
                .iter()
                .map(|n| (n.id, n.label.clone()))
                .collect(),
        )
    }

    pub(super) fn get(&self, id: NodeId) -> String {
        self.0.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}

/// Prints one line per engine event when `stream` is set
pub(super) struct HumanPrinter {
    labels: Labels,
    stream: bool,
    step: usize,
}

impl HumanPrinter {
    pub(super) fn new(labels: Labels, stream: bool) -> Self {
        Self {
            labels,
            stream,
            step: 0,
        }
    }

    fn line(&mut self, text: String) {
        self.step += 1;
        if self.stream {
            println!("[{:>3}] {}", self.step, text);
        }
    }
}

impl TraversalCallbacks for HumanPrinter {
    fn on_visit(&mut self, node: NodeId, snapshot: &Snapshot) {
        let text = format!(
            "visit {} (distance {})",
            self.labels.get(node),
            format_distance(snapshot.distance(node))
        );
        self.line(text);
    }

    fn on_update(&mut self, from: NodeId, to: NodeId, snapshot: &Snapshot) {
        let text = format!(
            "relax {} -> {}: distance {}",
            self.labels.get(from),
            self.labels.get(to),
            format_distance(snapshot.distance(to))
        );
        self.line(text);
    }

    fn on_mst_update(&mut self, step: &MstStep) {
        let text = match step.edge {
            None => format!("grow from {}", self.labels.get(seed_node(step))),
            Some(edge) => format!(
                "add {} - {} (weight {}), total {}",
                self.labels.get(edge.from),
                self.labels.get(edge.to),
                format_weight(edge.weight),
                format_weight(step.total_cost)
            ),
        };
        self.line(text);
    }

    fn on_cancelled(&mut self) {
        if self.stream {
            println!("Run cancelled after {} steps", self.step);
        }
    }
}

/// The seed step has visited only the start node
fn seed_node(step: &MstStep) -> NodeId {
    step.visited.iter().next().copied().unwrap_or_default()
}

/// Summary read back from the annotated session graph
pub(super) fn print_dijkstra_summary(graph: &Graph, result: &DijkstraResult) {
    let start = graph.label_for(result.start);

    if let Some(end) = result.end {
        match result.path_cost() {
            Some(cost) => {
                let path: Vec<String> = result.path.iter().map(|&id| graph.label_for(id)).collect();
                println!("Path: {}", path.join(" -> "));
                println!("Cost: {}", format_weight(cost));
            }
            None => println!("{} is unreachable from {}", graph.label_for(end), start),
        }
        return;
    }

    println!("Distances from {}:", start);
    for node in graph.nodes() {
        let state = match node.state {
            NodeState::Default => "",
            other => other.as_str(),
        };
        let line = format!(
            "  {:<12} {:<8} {}",
            node.label,
            format_distance(node.distance),
            state
        );
        println!("{}", line.trim_end());
    }
}

pub(super) fn print_mst_summary(graph: &Graph, result: &MstResult) {
    println!("Spanning tree from {}:", graph.label_for(result.start));
    for edge in &result.edges {
        println!(
            "  {} - {}  weight {}",
            graph.label_for(edge.from),
            graph.label_for(edge.to),
            format_weight(edge.weight)
        );
    }
    println!("Total cost: {}", format_weight(result.total_cost));

    if !result.spans(graph.node_count()) {
        let unreached: Vec<&str> = graph
            .nodes()
            .iter()
            .filter(|n| n.state != NodeState::MstVisited)
            .map(|n| n.label.as_str())
            .collect();
        println!(
            "Graph is disconnected: tree covers {} of {} nodes",
            result.visited.len(),
            graph.node_count()
        );
        println!("Not reached: {}", unreached.join(", "));
    }
}
