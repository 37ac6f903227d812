use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GraphError, Result};
use crate::graph::types::{is_valid_weight, Edge, Node, NodeId, NodeState, Weight};

/// A neighbor entry in the adjacency view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub to: NodeId,
    pub weight: Weight,
}

/// Read-only adjacency view derived from the edge list.
///
/// Built fresh for every run; never stored on the graph. Neighbor lists keep
/// edge insertion order, with each undirected edge listed from both ends.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    lists: BTreeMap<NodeId, Vec<Neighbor>>,
}

impl Adjacency {
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        self.lists.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Mutable undirected weighted graph.
///
/// Invariants kept by the mutators: no self-loops, at most one edge per
/// unordered pair, every weight finite and non-negative.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) next_id: NodeId,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node labelled with its own id
    pub fn add_node(&mut self) -> Result<NodeId> {
        let id = self.next_id;
        self.push_node(Node::new(id, id.to_string()))
    }

    pub fn add_node_with_label(&mut self, label: impl Into<String>) -> Result<NodeId> {
        let id = self.next_id;
        self.push_node(Node::new(id, label))
    }

    fn push_node(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id;
        self.next_id = id.checked_add(1).ok_or(GraphError::NodeIdsExhausted)?;
        self.nodes.push(node);
        tracing::trace!(id, "add_node");
        Ok(id)
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// Returns `Ok(false)` without touching the graph for a self-loop or an
    /// already connected pair; duplicate weights are never merged.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) -> Result<bool> {
        if !is_valid_weight(weight) {
            return Err(GraphError::InvalidWeight { value: weight });
        }
        for id in [a, b] {
            if !self.contains(id) {
                return Err(GraphError::NodeNotFound { id });
            }
        }
        if a == b {
            tracing::debug!(id = a, "rejecting self-loop");
            return Ok(false);
        }
        if self.has_edge(a, b) {
            tracing::debug!(a, b, "rejecting duplicate edge");
            return Ok(false);
        }

        self.edges.push(Edge::new(a, b, weight));
        for id in [a, b] {
            if let Some(node) = self.find_node_mut(id) {
                node.degree += 1;
            }
        }
        tracing::trace!(a, b, weight, "add_edge");
        Ok(true)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        let node = self
            .find_node_mut(id)
            .ok_or(GraphError::NodeNotFound { id })?;
        node.label = label.into();
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find_node(id).is_some()
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Label of a node, or the stringified id when the node is unknown
    pub fn label_for(&self, id: NodeId) -> String {
        self.find_node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Degree table in node order: (id, label, degree)
    pub fn degrees(&self) -> Vec<(NodeId, &str, usize)> {
        self.nodes
            .iter()
            .map(|n| (n.id, n.label.as_str(), n.degree))
            .collect()
    }

    /// Remove every node and edge and restart id assignment at zero
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 0;
    }

    /// Build the adjacency view, skipping edges with a missing endpoint
    pub fn adjacency(&self) -> Adjacency {
        let mut lists: BTreeMap<NodeId, Vec<Neighbor>> =
            self.nodes.iter().map(|n| (n.id, Vec::new())).collect();

        for edge in &self.edges {
            if !lists.contains_key(&edge.a) || !lists.contains_key(&edge.b) {
                tracing::warn!(a = edge.a, b = edge.b, "skipping dangling edge");
                continue;
            }
            for endpoint in [edge.a, edge.b] {
                let (Some(to), Some(list)) = (edge.other(endpoint), lists.get_mut(&endpoint))
                else {
                    continue;
                };
                list.push(Neighbor {
                    to,
                    weight: edge.weight,
                });
            }
        }

        Adjacency { lists }
    }

    // Visual annotations. Only the embedding layer calls these; the engine
    // works on its own run state and never writes to the graph.

    /// Reset every node to its resting state, keeping start/end markers
    pub fn reset_states(&mut self, start: Option<NodeId>, end: Option<NodeId>) {
        for node in &mut self.nodes {
            node.state = if Some(node.id) == start {
                NodeState::Start
            } else if Some(node.id) == end {
                NodeState::End
            } else {
                NodeState::Default
            };
            node.distance = f64::INFINITY;
            node.visited = false;
        }
        for edge in &mut self.edges {
            edge.highlight = false;
            edge.in_mst = false;
        }
    }

    /// Copy a distance/visited snapshot onto the nodes.
    ///
    /// Visited nodes without a marker state become `visited`.
    pub fn annotate_snapshot(
        &mut self,
        distances: &BTreeMap<NodeId, f64>,
        visited: &BTreeSet<NodeId>,
    ) {
        for node in &mut self.nodes {
            node.distance = distances.get(&node.id).copied().unwrap_or(f64::INFINITY);
            node.visited = visited.contains(&node.id);
            if node.visited && !node.state.is_marker() {
                node.state = NodeState::Visited;
            }
        }
    }

    pub fn set_state(&mut self, id: NodeId, state: NodeState) {
        if let Some(node) = self.find_node_mut(id) {
            node.state = state;
        }
    }

    pub fn mark_path(&mut self, path: &[NodeId]) {
        for &id in path {
            self.set_state(id, NodeState::Path);
        }
    }

    pub fn mark_mst_edge(&mut self, a: NodeId, b: NodeId) {
        for edge in self.edges.iter_mut().filter(|e| e.connects(a, b)) {
            edge.in_mst = true;
        }
    }

    pub fn highlight_edge(&mut self, a: NodeId, b: NodeId) {
        for edge in self.edges.iter_mut().filter(|e| e.connects(a, b)) {
            edge.highlight = true;
        }
    }

    pub fn clear_highlights(&mut self) {
        for edge in &mut self.edges {
            edge.highlight = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new();
        for _ in 0..3 {
            graph.add_node().unwrap();
        }
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(0, 2, 5.0).unwrap();
        graph
    }

    #[test]
    fn test_ids_are_monotonic_and_labels_default_to_id() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_node().unwrap(), 0);
        assert_eq!(graph.add_node_with_label("B").unwrap(), 1);
        assert_eq!(graph.add_node().unwrap(), 2);
        assert_eq!(graph.label_for(0), "0");
        assert_eq!(graph.label_for(1), "B");
        assert_eq!(graph.label_for(99), "99");
    }

    #[test]
    fn test_add_node_fails_when_ids_run_out() {
        let mut graph = Graph::new();
        graph.next_id = NodeId::MAX;
        let err = graph.add_node().unwrap_err();
        assert!(matches!(err, GraphError::NodeIdsExhausted));
        assert!(graph.is_empty());
        assert_eq!(graph.next_id, NodeId::MAX);
    }

    #[test]
    fn test_self_loop_rejected_silently() {
        let mut graph = Graph::new();
        graph.add_node().unwrap();
        assert!(!graph.add_edge(0, 0, 1.0).unwrap());
        assert!(graph.edges().is_empty());
        assert_eq!(graph.find_node(0).unwrap().degree, 0);
    }

    #[test]
    fn test_duplicate_edge_rejected_not_merged() {
        let mut graph = triangle();
        assert!(!graph.add_edge(1, 0, 10.0).unwrap());
        assert_eq!(graph.edges().len(), 3);
        let edge = graph.edges().iter().find(|e| e.connects(0, 1)).unwrap();
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn test_negative_weight_is_an_error() {
        let mut graph = triangle();
        graph.add_node().unwrap();
        let err = graph.add_edge(0, 3, -2.0).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
        assert_eq!(graph.edges().len(), 3);
    }

    #[test]
    fn test_edge_to_unknown_node_is_an_error() {
        let mut graph = triangle();
        let err = graph.add_edge(0, 9, 1.0).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { id: 9 }));
    }

    #[test]
    fn test_degrees_track_edges() {
        let graph = triangle();
        let degrees: Vec<usize> = graph.degrees().iter().map(|d| d.2).collect();
        assert_eq!(degrees, vec![2, 2, 2]);
    }

    #[test]
    fn test_adjacency_is_symmetric_and_ordered() {
        let graph = triangle();
        let adj = graph.adjacency();
        let from_zero: Vec<NodeId> = adj.neighbors(0).iter().map(|n| n.to).collect();
        assert_eq!(from_zero, vec![1, 2]);
        let from_two: Vec<(NodeId, f64)> =
            adj.neighbors(2).iter().map(|n| (n.to, n.weight)).collect();
        assert_eq!(from_two, vec![(1, 2.0), (0, 5.0)]);
    }

    #[test]
    fn test_adjacency_skips_dangling_edges() {
        let mut graph = triangle();
        graph.edges.push(Edge::new(2, 42, 1.0));
        let adj = graph.adjacency();
        assert!(adj.neighbors(2).iter().all(|n| n.to != 42));
        assert!(adj.neighbors(42).is_empty());
    }

    #[test]
    fn test_clear_resets_id_counter() {
        let mut graph = triangle();
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
        assert_eq!(graph.add_node().unwrap(), 0);
    }

    #[test]
    fn test_annotations_keep_markers() {
        let mut graph = triangle();
        graph.reset_states(Some(0), Some(2));
        let distances = BTreeMap::from([(0, 0.0), (1, 1.0)]);
        let visited = BTreeSet::from([0, 1]);
        graph.annotate_snapshot(&distances, &visited);

        assert_eq!(graph.find_node(0).unwrap().state, NodeState::Start);
        assert_eq!(graph.find_node(1).unwrap().state, NodeState::Visited);
        assert_eq!(graph.find_node(2).unwrap().state, NodeState::End);
        assert!(graph.find_node(2).unwrap().distance.is_infinite());
        assert_eq!(graph.find_node(1).unwrap().distance, 1.0);
    }

    #[test]
    fn test_mst_edge_flag_cleared_by_reset() {
        let mut graph = triangle();
        graph.mark_mst_edge(1, 0);
        assert!(graph.edges()[0].in_mst);
        graph.reset_states(None, None);
        assert!(!graph.edges()[0].in_mst);
    }
}
