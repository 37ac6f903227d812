//! Graph model and traversal engine
//!
//! - Graph model: nodes, undirected weighted edges, adjacency view
//! - File format: TOML persistence of the structure
//! - Algorithms: stepable Dijkstra and Prim

pub mod algos;
pub mod file;
pub mod model;
pub mod types;

pub use algos::{run_dijkstra, run_prim, DijkstraRequest, PrimRequest};
pub use file::GraphFile;
pub use model::{Adjacency, Graph, Neighbor};
pub use types::{Edge, Node, NodeId, NodeState, Weight};
