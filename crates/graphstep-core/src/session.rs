//! Interactive session: a graph, the picked endpoints, and run annotation
//!
//! The session plays the embedding-controller role around the engine. It
//! validates run preconditions, hands the engine a snapshot of the graph,
//! and mirrors every engine event onto the live graph's display annotations.
//! Runs borrow the session mutably, so two runs can never overlap on the
//! same graph.
//!
//! The annotations (node states, distances, highlighted and tree edges) are
//! for embedders that render the live graph. They are never persisted; the
//! CLI reads them back only for its run summaries.

use crate::error::{GraphError, Result};
use crate::graph::algos::{
    run_dijkstra, run_prim, DijkstraRequest, DijkstraResult, MstResult, MstStep, PrimRequest,
    RunOutcome, Snapshot, TraversalCallbacks,
};
use crate::graph::{Graph, NodeId, NodeState};
use crate::step::{Pacing, Suspend};

#[derive(Debug, Clone, Default)]
pub struct Session {
    graph: Graph,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl Session {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            start: None,
            end: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    pub fn pick_start(&mut self, id: NodeId) -> Result<()> {
        if !self.graph.contains(id) {
            return Err(GraphError::InvalidStart { id });
        }
        self.start = Some(id);
        self.graph.reset_states(self.start, self.end);
        Ok(())
    }

    pub fn pick_end(&mut self, id: NodeId) -> Result<()> {
        if !self.graph.contains(id) {
            return Err(GraphError::InvalidEnd { id });
        }
        self.end = Some(id);
        self.graph.reset_states(self.start, self.end);
        Ok(())
    }

    pub fn clear_end(&mut self) {
        self.end = None;
        self.graph.reset_states(self.start, self.end);
    }

    /// Drop all annotations from the previous run
    pub fn reset(&mut self) {
        self.graph.reset_states(self.start, self.end);
    }

    /// Empty the graph and forget the picked endpoints
    pub fn clear(&mut self) {
        self.graph.clear();
        self.start = None;
        self.end = None;
    }

    fn require_start(&self) -> Result<NodeId> {
        let start = self.start.ok_or(GraphError::NoStartSelected)?;
        if self.graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        Ok(start)
    }

    /// Shortest paths from the picked start, toward the picked end if any
    pub fn run_dijkstra(
        &mut self,
        pacing: Pacing,
        callbacks: &mut dyn TraversalCallbacks,
        suspend: &mut dyn Suspend,
    ) -> Result<RunOutcome<DijkstraResult>> {
        let start = self.require_start()?;
        let request = DijkstraRequest::new(start)
            .with_end(self.end)
            .with_pacing(pacing);

        self.graph.reset_states(self.start, self.end);
        let snapshot = self.graph.clone();
        let mut annotator = Annotator {
            graph: &mut self.graph,
            inner: callbacks,
        };
        run_dijkstra(&snapshot, request, &mut annotator, suspend)
    }

    /// Spanning tree grown from the picked start
    pub fn run_prim(
        &mut self,
        pacing: Pacing,
        callbacks: &mut dyn TraversalCallbacks,
        suspend: &mut dyn Suspend,
    ) -> Result<RunOutcome<MstResult>> {
        let start = self.require_start()?;
        let request = PrimRequest::new(start).with_pacing(pacing);

        self.graph.reset_states(self.start, self.end);
        let snapshot = self.graph.clone();
        let mut annotator = Annotator {
            graph: &mut self.graph,
            inner: callbacks,
        };
        run_prim(&snapshot, request, &mut annotator, suspend)
    }
}

/// Mirrors engine events onto the live graph, then forwards them
struct Annotator<'a> {
    graph: &'a mut Graph,
    inner: &'a mut dyn TraversalCallbacks,
}

impl Annotator<'_> {
    fn mark_processing(&mut self, node: NodeId) {
        let is_marker = self
            .graph
            .find_node(node)
            .is_some_and(|n| n.state.is_marker());
        if !is_marker {
            self.graph.set_state(node, NodeState::Processing);
        }
    }
}

impl TraversalCallbacks for Annotator<'_> {
    fn on_visit(&mut self, node: NodeId, snapshot: &Snapshot) {
        self.graph.clear_highlights();
        self.graph
            .annotate_snapshot(&snapshot.distances, &snapshot.visited);
        self.mark_processing(node);
        self.inner.on_visit(node, snapshot);
    }

    fn on_update(&mut self, from: NodeId, to: NodeId, snapshot: &Snapshot) {
        self.graph.clear_highlights();
        self.graph
            .annotate_snapshot(&snapshot.distances, &snapshot.visited);
        self.mark_processing(from);
        self.graph.highlight_edge(from, to);
        self.inner.on_update(from, to, snapshot);
    }

    fn on_finish(&mut self, result: &DijkstraResult) {
        self.graph.clear_highlights();
        self.graph
            .annotate_snapshot(&result.distances, &result.visited);
        self.graph.mark_path(&result.path);
        self.inner.on_finish(result);
    }

    fn on_mst_update(&mut self, step: &MstStep) {
        for &id in &step.visited {
            self.graph.set_state(id, NodeState::MstVisited);
        }
        if let Some(edge) = step.edge {
            self.graph.mark_mst_edge(edge.from, edge.to);
        }
        self.inner.on_mst_update(step);
    }

    fn on_mst_finish(&mut self, result: &MstResult) {
        self.inner.on_mst_finish(result);
    }

    fn on_cancelled(&mut self) {
        self.graph.clear_highlights();
        self.inner.on_cancelled();
    }
}
