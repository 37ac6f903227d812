//! TOML persistence for the graph structure
//!
//! Only ids, labels, edges and weights are written. Run annotations
//! (distances, visited flags, node states) never reach the file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::model::Graph;
use crate::graph::types::{is_valid_weight, Edge, Node, NodeId};

/// On-disk representation of a [`Graph`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub next_id: NodeId,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphFile {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            next_id: graph.next_id,
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
        }
    }

    /// Validate and convert into a live graph, recomputing degrees
    pub fn into_graph(self) -> std::result::Result<Graph, String> {
        let mut ids = HashSet::new();
        let mut next_id = self.next_id;
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(format!("duplicate node id {}", node.id));
            }
            let after = node
                .id
                .checked_add(1)
                .ok_or_else(|| format!("node id {} out of range", node.id))?;
            next_id = next_id.max(after);
        }

        let mut graph = Graph {
            nodes: self.nodes,
            edges: Vec::with_capacity(self.edges.len()),
            next_id,
        };

        for edge in self.edges {
            if !is_valid_weight(edge.weight) {
                return Err(format!(
                    "edge {}-{} has invalid weight {}",
                    edge.a, edge.b, edge.weight
                ));
            }
            if edge.a == edge.b {
                return Err(format!("edge {}-{} is a self-loop", edge.a, edge.b));
            }
            if graph.has_edge(edge.a, edge.b) {
                return Err(format!("duplicate edge {}-{}", edge.a, edge.b));
            }
            graph.edges.push(edge);
        }

        for node in &mut graph.nodes {
            node.degree = 0;
        }
        let endpoints: Vec<NodeId> = graph.edges.iter().flat_map(|e| [e.a, e.b]).collect();
        for id in endpoints {
            if let Some(node) = graph.nodes.iter_mut().find(|n| n.id == id) {
                node.degree += 1;
            }
        }

        Ok(graph)
    }
}

impl Graph {
    /// Load a graph from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GraphError::GraphFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let file: GraphFile = toml::from_str(&content)?;
        let graph = file
            .into_graph()
            .map_err(|reason| GraphError::InvalidGraphFile {
                path: path.to_path_buf(),
                reason,
            })?;
        tracing::debug!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edges().len(),
            "load_graph"
        );
        Ok(graph)
    }

    /// Save the graph structure to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&GraphFile::from_graph(self))?;
        fs::write(path, content)?;
        Ok(())
    }
}
