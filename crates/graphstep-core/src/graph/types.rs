use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier, assigned monotonically by [`Graph`](super::Graph)
pub type NodeId = u32;

/// Edge weight; always finite and non-negative once inside a graph
pub type Weight = f64;

/// Display classification of a node.
///
/// Purely a rendering annotation: the traversal engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    #[default]
    Default,
    Start,
    End,
    Processing,
    Visited,
    Path,
    MstVisited,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Default => "default",
            NodeState::Start => "start",
            NodeState::End => "end",
            NodeState::Processing => "processing",
            NodeState::Visited => "visited",
            NodeState::Path => "path",
            NodeState::MstVisited => "mst-visited",
        }
    }

    /// Start, end and path markers survive progress annotations
    pub fn is_marker(&self) -> bool {
        matches!(self, NodeState::Start | NodeState::End | NodeState::Path)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn infinite() -> f64 {
    f64::INFINITY
}

/// A graph vertex.
///
/// Only `id` and `label` are persisted. The remaining fields are display
/// annotations written by the embedding layer after each engine event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(skip)]
    pub degree: usize,
    #[serde(skip, default = "infinite")]
    pub distance: f64,
    #[serde(skip)]
    pub visited: bool,
    #[serde(skip)]
    pub state: NodeState,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            degree: 0,
            distance: f64::INFINITY,
            visited: false,
            state: NodeState::Default,
        }
    }
}

/// An undirected weighted edge between two distinct nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: Weight,
    /// Transient highlight for the renderer
    #[serde(skip)]
    pub highlight: bool,
    /// Set when the edge was chosen by the last spanning-tree run
    #[serde(skip)]
    pub in_mst: bool,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId, weight: Weight) -> Self {
        Self {
            a,
            b,
            weight,
            highlight: false,
            in_mst: false,
        }
    }

    /// True if this edge joins `x` and `y` in either orientation
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Check that a weight is usable by the engine
pub fn is_valid_weight(weight: Weight) -> bool {
    weight.is_finite() && weight >= 0.0
}
