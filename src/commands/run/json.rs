//! JSON result documents for algorithm runs

use serde_json::{json, Value};

use super::human::Labels;
use crate::commands::format::distance_json;
use graphstep_core::graph::algos::{DijkstraResult, MstResult};

pub(super) fn dijkstra_json(labels: &Labels, result: &DijkstraResult) -> Value {
    let nodes: Vec<Value> = result
        .distances
        .iter()
        .map(|(&id, &distance)| {
            json!({
                "id": id,
                "label": labels.get(id),
                "distance": distance_json(distance),
                "predecessor": result.predecessors.get(&id).copied().flatten(),
                "visited": result.visited.contains(&id),
            })
        })
        .collect();

    json!({
        "algorithm": "dijkstra",
        "start": result.start,
        "end": result.end,
        "nodes": nodes,
        "path": result.path,
        "cost": result.path_cost(),
    })
}

pub(super) fn prim_json(result: &MstResult, node_count: usize) -> Value {
    json!({
        "algorithm": "prim",
        "start": result.start,
        "edges": result.edges,
        "total_cost": result.total_cost,
        "visited": result.visited,
        "spanning": result.spans(node_count),
    })
}
