use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::graph::types::{NodeId, Weight};
use crate::step::{Pacing, Resume, StepKind, Suspend};

/// Node id → tentative distance; unreachable nodes hold `f64::INFINITY`
pub type DistanceMap = BTreeMap<NodeId, f64>;

/// Node id → parent on the shortest-path tree, `None` for roots and unreached
pub type PredecessorMap = BTreeMap<NodeId, Option<NodeId>>;

/// Settled node ids
pub type VisitedSet = BTreeSet<NodeId>;

/// Immutable copy of run state handed to observers.
///
/// Owned by the event, never a view into the engine's working maps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub distances: DistanceMap,
    pub visited: VisitedSet,
}

impl Snapshot {
    pub fn distance(&self, id: NodeId) -> f64 {
        self.distances.get(&id).copied().unwrap_or(f64::INFINITY)
    }
}

/// Final result of a shortest-path run
#[derive(Debug, Clone, PartialEq)]
pub struct DijkstraResult {
    pub start: NodeId,
    pub end: Option<NodeId>,
    pub distances: DistanceMap,
    pub predecessors: PredecessorMap,
    pub visited: VisitedSet,
    /// Start-to-end node sequence; empty when no end was given or it is unreachable
    pub path: Vec<NodeId>,
}

impl DijkstraResult {
    pub fn distance(&self, id: NodeId) -> f64 {
        self.distances.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.distance(id).is_finite()
    }

    /// Cost of the reconstructed path, if there is one
    pub fn path_cost(&self) -> Option<f64> {
        let end = self.end?;
        if self.path.is_empty() {
            return None;
        }
        Some(self.distance(end))
    }
}

/// An edge selected into the spanning tree, in its stored orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MstEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

/// Progress report for one spanning-tree step
#[derive(Debug, Clone, PartialEq)]
pub struct MstStep {
    /// `None` for the initial step that only seeds the start node
    pub edge: Option<MstEdge>,
    pub total_cost: f64,
    pub visited: VisitedSet,
}

/// Final result of a spanning-tree run
#[derive(Debug, Clone, PartialEq)]
pub struct MstResult {
    pub start: NodeId,
    pub edges: Vec<MstEdge>,
    pub total_cost: f64,
    pub visited: VisitedSet,
}

impl MstResult {
    /// True when the tree reaches all `node_count` nodes.
    ///
    /// A disconnected graph yields a fragment covering only the start's
    /// component; edge count is the only signal.
    pub fn spans(&self, node_count: usize) -> bool {
        self.edges.len() + 1 >= node_count
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> RunOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }
}

/// Observer of a traversal.
///
/// Every method has a no-op default so observers implement only what they
/// render. Events arrive in algorithm order; `on_visit(u)` precedes any
/// `on_update(u, _)`, and exactly one of the finish methods or
/// `on_cancelled` closes every run.
pub trait TraversalCallbacks {
    fn on_visit(&mut self, _node: NodeId, _snapshot: &Snapshot) {}

    fn on_update(&mut self, _from: NodeId, _to: NodeId, _snapshot: &Snapshot) {}

    fn on_finish(&mut self, _result: &DijkstraResult) {}

    fn on_mst_update(&mut self, _step: &MstStep) {}

    fn on_mst_finish(&mut self, _result: &MstResult) {}

    fn on_cancelled(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallbacks;

impl TraversalCallbacks for NoCallbacks {}

/// Suspend after an emission, mapping a cancel into the terminal callback.
/// Returns false when the run must stop.
pub(crate) fn pause(
    suspend: &mut dyn Suspend,
    callbacks: &mut dyn TraversalCallbacks,
    pacing: Pacing,
    kind: StepKind,
) -> bool {
    match suspend.suspend(kind, pacing.delay_for(kind)) {
        Resume::Continue => true,
        Resume::Cancel => {
            callbacks.on_cancelled();
            false
        }
    }
}
