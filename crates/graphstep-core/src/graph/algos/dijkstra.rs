use std::time::Instant;

use crate::error::{GraphError, Result};
use crate::graph::algos::heap::{HeapEntry, MinQueue};
use crate::graph::algos::shared::{
    pause, DijkstraResult, DistanceMap, PredecessorMap, RunOutcome, Snapshot,
    TraversalCallbacks, VisitedSet,
};
use crate::graph::model::Graph;
use crate::graph::types::NodeId;
use crate::step::{Pacing, StepKind, Suspend};
use crate::trace_time;

/// Parameters for a shortest-path run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DijkstraRequest {
    pub start: NodeId,
    /// Stop once this node is settled; `None` settles every reachable node
    pub end: Option<NodeId>,
    pub pacing: Pacing,
}

impl DijkstraRequest {
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            end: None,
            pacing: Pacing::default(),
        }
    }

    pub fn with_end(mut self, end: Option<NodeId>) -> Self {
        self.end = end;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Run state, created per invocation and dropped after the finish event
struct DijkstraState {
    distances: DistanceMap,
    predecessors: PredecessorMap,
    visited: VisitedSet,
    frontier: MinQueue,
}

impl DijkstraState {
    fn new(graph: &Graph, start: NodeId) -> Self {
        let mut distances: DistanceMap = graph
            .nodes()
            .iter()
            .map(|n| (n.id, f64::INFINITY))
            .collect();
        let predecessors: PredecessorMap = graph.nodes().iter().map(|n| (n.id, None)).collect();
        distances.insert(start, 0.0);

        let mut frontier = MinQueue::new();
        frontier.push(start, 0.0);

        Self {
            distances,
            predecessors,
            visited: VisitedSet::new(),
            frontier,
        }
    }

    fn distance(&self, id: NodeId) -> f64 {
        self.distances.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            distances: self.distances.clone(),
            visited: self.visited.clone(),
        }
    }

    /// Walk predecessors back from `end`; empty if `end` was never reached
    fn reconstruct_path(&self, start: NodeId, end: NodeId) -> Vec<NodeId> {
        let reached = end == start || self.predecessors.get(&end).copied().flatten().is_some();
        if !reached {
            return Vec::new();
        }

        let mut path = vec![end];
        let mut current = end;
        while let Some(Some(parent)) = self.predecessors.get(&current) {
            path.push(*parent);
            current = *parent;
        }
        path.reverse();
        path
    }
}

fn validate(graph: &Graph, request: &DijkstraRequest) -> Result<()> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    if !graph.contains(request.start) {
        return Err(GraphError::InvalidStart { id: request.start });
    }
    if let Some(end) = request.end {
        if !graph.contains(end) {
            return Err(GraphError::InvalidEnd { id: end });
        }
    }
    Ok(())
}

/// Run Dijkstra's algorithm step by step.
///
/// Emits `on_visit` when a node is settled and `on_update` on every strict
/// improvement, suspending after each. Stale queue entries (nodes already
/// settled through a cheaper entry) are dropped on pop. Equal-cost paths
/// never replace an existing predecessor.
///
/// Preconditions are checked before any run state exists; a cancelled
/// suspension ends the run with [`RunOutcome::Cancelled`].
#[tracing::instrument(skip(graph, callbacks, suspend), fields(start = request.start, end = ?request.end, pacing_ms = request.pacing.as_millis()))]
pub fn run_dijkstra(
    graph: &Graph,
    request: DijkstraRequest,
    callbacks: &mut dyn TraversalCallbacks,
    suspend: &mut dyn Suspend,
) -> Result<RunOutcome<DijkstraResult>> {
    validate(graph, &request)?;

    let started = Instant::now();
    let adjacency = graph.adjacency();
    let mut state = DijkstraState::new(graph, request.start);

    while let Some(HeapEntry {
        node_id: current,
        priority,
    }) = state.frontier.pop()
    {
        if state.visited.contains(&current) {
            tracing::trace!(node = current, priority, "discard stale entry");
            continue;
        }

        state.visited.insert(current);
        tracing::trace!(
            node = current,
            distance = state.distance(current),
            frontier = state.frontier.len(),
            "visit"
        );
        callbacks.on_visit(current, &state.snapshot());
        if !pause(suspend, callbacks, request.pacing, StepKind::Visit) {
            return Ok(RunOutcome::Cancelled);
        }

        let base = state.distance(current);
        for neighbor in adjacency.neighbors(current) {
            if state.visited.contains(&neighbor.to) {
                continue;
            }
            let candidate = base + neighbor.weight;
            if candidate < state.distance(neighbor.to) {
                state.distances.insert(neighbor.to, candidate);
                state.predecessors.insert(neighbor.to, Some(current));
                state.frontier.push(neighbor.to, candidate);

                tracing::trace!(from = current, to = neighbor.to, candidate, "relax");
                callbacks.on_update(current, neighbor.to, &state.snapshot());
                if !pause(suspend, callbacks, request.pacing, StepKind::Relax) {
                    return Ok(RunOutcome::Cancelled);
                }
            }
        }

        if request.end == Some(current) {
            tracing::debug!(node = current, "end node settled");
            break;
        }
    }

    let path = request
        .end
        .map(|end| state.reconstruct_path(request.start, end))
        .unwrap_or_default();

    let result = DijkstraResult {
        start: request.start,
        end: request.end,
        distances: state.distances,
        predecessors: state.predecessors,
        visited: state.visited,
        path,
    };

    trace_time!(started, "dijkstra_run");
    tracing::debug!(
        settled = result.visited.len(),
        path_len = result.path.len(),
        "dijkstra finished"
    );
    callbacks.on_finish(&result);
    Ok(RunOutcome::Completed(result))
}

#[cfg(test)]
mod tests;
