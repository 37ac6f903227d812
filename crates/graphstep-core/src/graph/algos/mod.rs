//! Graph algorithm implementations
//!
//! Contains the stepable traversal engine:
//! - `heap`: Binary min-heap with lazy deletion
//! - `dijkstra`: Weighted shortest paths
//! - `prim`: Minimum spanning tree
//! - `shared`: Snapshots, results and the callback interface

pub mod dijkstra;
pub mod heap;
pub mod prim;
pub mod shared;

pub use dijkstra::{run_dijkstra, DijkstraRequest};
pub use heap::{HeapEntry, MinQueue};
pub use prim::{run_prim, PrimRequest};
pub use shared::{
    DijkstraResult, DistanceMap, MstEdge, MstResult, MstStep, NoCallbacks, PredecessorMap,
    RunOutcome, Snapshot, TraversalCallbacks, VisitedSet,
};
