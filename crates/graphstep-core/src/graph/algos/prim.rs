use std::collections::BTreeSet;
use std::time::Instant;

use crate::error::{GraphError, Result};
use crate::graph::algos::shared::{
    pause, MstEdge, MstResult, MstStep, RunOutcome, TraversalCallbacks, VisitedSet,
};
use crate::graph::model::Graph;
use crate::graph::types::NodeId;
use crate::step::{Pacing, StepKind, Suspend};
use crate::trace_time;

/// Parameters for a spanning-tree run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimRequest {
    pub start: NodeId,
    pub pacing: Pacing,
}

impl PrimRequest {
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Cheapest edge with exactly one endpoint in `visited`.
///
/// Scans the whole edge list in insertion order; among equal weights the
/// first one scanned wins. Edges touching unknown nodes are ignored.
fn cheapest_crossing_edge(
    graph: &Graph,
    known: &BTreeSet<NodeId>,
    visited: &VisitedSet,
) -> Option<MstEdge> {
    let mut best: Option<MstEdge> = None;
    for edge in graph.edges() {
        if !known.contains(&edge.a) || !known.contains(&edge.b) {
            continue;
        }
        if visited.contains(&edge.a) == visited.contains(&edge.b) {
            continue;
        }
        if best.is_none_or(|b| edge.weight < b.weight) {
            best = Some(MstEdge {
                from: edge.a,
                to: edge.b,
                weight: edge.weight,
            });
        }
    }
    best
}

/// Grow a minimum spanning tree from `start` with Prim's algorithm.
///
/// Emits `on_mst_update` once for the seeded start node and once per added
/// edge, suspending after each. On a disconnected graph the run ends with
/// the tree of the start node's component; that is a normal result.
#[tracing::instrument(skip(graph, callbacks, suspend), fields(start = request.start, pacing_ms = request.pacing.as_millis()))]
pub fn run_prim(
    graph: &Graph,
    request: PrimRequest,
    callbacks: &mut dyn TraversalCallbacks,
    suspend: &mut dyn Suspend,
) -> Result<RunOutcome<MstResult>> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    if !graph.contains(request.start) {
        return Err(GraphError::InvalidStart { id: request.start });
    }

    let started = Instant::now();
    let known: BTreeSet<NodeId> = graph.nodes().iter().map(|n| n.id).collect();
    let mut visited = VisitedSet::new();
    let mut edges = Vec::new();
    let mut total_cost = 0.0;

    visited.insert(request.start);
    callbacks.on_mst_update(&MstStep {
        edge: None,
        total_cost,
        visited: visited.clone(),
    });
    if !pause(suspend, callbacks, request.pacing, StepKind::Grow) {
        return Ok(RunOutcome::Cancelled);
    }

    while visited.len() < known.len() {
        let Some(edge) = cheapest_crossing_edge(graph, &known, &visited) else {
            tracing::debug!(
                reached = visited.len(),
                total = known.len(),
                "no crossing edge left, graph is disconnected"
            );
            break;
        };

        edges.push(edge);
        total_cost += edge.weight;
        visited.insert(edge.from);
        visited.insert(edge.to);

        tracing::trace!(from = edge.from, to = edge.to, weight = edge.weight, total_cost, "grow");
        callbacks.on_mst_update(&MstStep {
            edge: Some(edge),
            total_cost,
            visited: visited.clone(),
        });
        if !pause(suspend, callbacks, request.pacing, StepKind::Grow) {
            return Ok(RunOutcome::Cancelled);
        }
    }

    let result = MstResult {
        start: request.start,
        edges,
        total_cost,
        visited,
    };

    trace_time!(started, "prim_run");
    tracing::debug!(
        edges = result.edges.len(),
        total_cost = result.total_cost,
        "prim finished"
    );
    callbacks.on_mst_finish(&result);
    Ok(RunOutcome::Completed(result))
}
