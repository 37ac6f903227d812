use super::*;
use crate::graph::algos::shared::NoCallbacks;
use crate::step::{Immediate, Resume};
use std::time::Duration;

/// Records every event as a short string
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    finished: Option<DijkstraResult>,
    cancelled: bool,
}

impl TraversalCallbacks for Recorder {
    fn on_visit(&mut self, node: NodeId, _snapshot: &Snapshot) {
        self.events.push(format!("visit {node}"));
    }

    fn on_update(&mut self, from: NodeId, to: NodeId, snapshot: &Snapshot) {
        self.events
            .push(format!("update {from}->{to} {}", snapshot.distance(to)));
    }

    fn on_finish(&mut self, result: &DijkstraResult) {
        self.events.push("finish".to_string());
        self.finished = Some(result.clone());
    }

    fn on_cancelled(&mut self) {
        self.events.push("cancelled".to_string());
        self.cancelled = true;
    }
}

/// Cancels after a fixed number of suspensions
struct CancelAfter(usize);

impl Suspend for CancelAfter {
    fn suspend(&mut self, _kind: StepKind, _delay: Duration) -> Resume {
        if self.0 == 0 {
            return Resume::Cancel;
        }
        self.0 -= 1;
        Resume::Continue
    }
}

/// nodes {0,1,2,3}; 0-1:4, 0-2:1, 2-1:2, 1-3:5, 2-3:8
fn diamond() -> Graph {
    let mut graph = Graph::new();
    for _ in 0..4 {
        graph.add_node().unwrap();
    }
    graph.add_edge(0, 1, 4.0).unwrap();
    graph.add_edge(0, 2, 1.0).unwrap();
    graph.add_edge(2, 1, 2.0).unwrap();
    graph.add_edge(1, 3, 5.0).unwrap();
    graph.add_edge(2, 3, 8.0).unwrap();
    graph
}

fn run(graph: &Graph, start: NodeId, end: Option<NodeId>) -> DijkstraResult {
    run_dijkstra(
        graph,
        DijkstraRequest::new(start).with_end(end),
        &mut NoCallbacks,
        &mut Immediate,
    )
    .unwrap()
    .completed()
    .unwrap()
}

#[test]
fn test_shortest_path_prefers_cheaper_detour() {
    let result = run(&diamond(), 0, Some(3));
    assert_eq!(result.distance(3), 8.0);
    assert_eq!(result.path, vec![0, 2, 1, 3]);
    assert_eq!(result.path_cost(), Some(8.0));
}

#[test]
fn test_all_distances_without_end() {
    let result = run(&diamond(), 0, None);
    assert_eq!(result.distance(0), 0.0);
    assert_eq!(result.distance(1), 3.0);
    assert_eq!(result.distance(2), 1.0);
    assert_eq!(result.distance(3), 8.0);
    assert!(result.path.is_empty());
    assert_eq!(result.visited.len(), 4);
    assert_eq!(result.predecessors[&0], None);
    assert_eq!(result.predecessors[&1], Some(2));
}

#[test]
fn test_unreachable_end_has_infinite_distance_and_empty_path() {
    let mut graph = diamond();
    graph.add_node().unwrap();
    let result = run(&graph, 0, Some(4));
    assert!(result.distance(4).is_infinite());
    assert!(!result.is_reachable(4));
    assert!(result.path.is_empty());
    assert_eq!(result.path_cost(), None);
}

#[test]
fn test_end_equal_to_start() {
    let result = run(&diamond(), 2, Some(2));
    assert_eq!(result.path, vec![2]);
    assert_eq!(result.path_cost(), Some(0.0));
}

#[test]
fn test_invalid_start_fails_before_any_event() {
    let mut recorder = Recorder::default();
    let err = run_dijkstra(
        &diamond(),
        DijkstraRequest::new(99),
        &mut recorder,
        &mut Immediate,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::InvalidStart { id: 99 }));
    assert!(recorder.events.is_empty());
}

#[test]
fn test_invalid_end_is_rejected() {
    let err = run_dijkstra(
        &diamond(),
        DijkstraRequest::new(0).with_end(Some(17)),
        &mut NoCallbacks,
        &mut Immediate,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::InvalidEnd { id: 17 }));
}

#[test]
fn test_empty_graph_is_rejected() {
    let err = run_dijkstra(
        &Graph::new(),
        DijkstraRequest::new(0),
        &mut NoCallbacks,
        &mut Immediate,
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::EmptyGraph));
}

#[test]
fn test_event_order() {
    let mut recorder = Recorder::default();
    run_dijkstra(
        &diamond(),
        DijkstraRequest::new(0).with_end(Some(3)),
        &mut recorder,
        &mut Immediate,
    )
    .unwrap();

    assert_eq!(
        recorder.events,
        vec![
            "visit 0",
            "update 0->1 4",
            "update 0->2 1",
            "visit 2",
            "update 2->1 3",
            "update 2->3 9",
            "visit 1",
            "update 1->3 8",
            "visit 3",
            "finish",
        ]
    );
}

#[test]
fn test_each_node_visited_once_despite_stale_entries() {
    // Node 1 is pushed twice (4 then 3); the stale entry must not revisit it
    let mut recorder = Recorder::default();
    run_dijkstra(
        &diamond(),
        DijkstraRequest::new(0),
        &mut recorder,
        &mut Immediate,
    )
    .unwrap();

    let visits: Vec<&String> = recorder
        .events
        .iter()
        .filter(|e| e.starts_with("visit"))
        .collect();
    assert_eq!(visits.len(), 4);
}

#[test]
fn test_equal_cost_keeps_first_predecessor() {
    // 0-1:1, 0-2:1, 1-3:1, 2-3:1: node 3 is first reached via 1
    let mut graph = Graph::new();
    for _ in 0..4 {
        graph.add_node().unwrap();
    }
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(0, 2, 1.0).unwrap();
    graph.add_edge(1, 3, 1.0).unwrap();
    graph.add_edge(2, 3, 1.0).unwrap();

    let result = run(&graph, 0, Some(3));
    assert_eq!(result.predecessors[&3], Some(1));
    assert_eq!(result.path, vec![0, 1, 3]);
}

#[test]
fn test_idempotent_runs() {
    let graph = diamond();
    let first = run(&graph, 1, None);
    let second = run(&graph, 1, None);
    assert_eq!(first.distances, second.distances);
    assert_eq!(first.predecessors, second.predecessors);
}

#[test]
fn test_engine_does_not_touch_graph() {
    let graph = diamond();
    let before = graph.clone();
    run(&graph, 0, Some(3));
    assert_eq!(graph.nodes(), before.nodes());
    assert_eq!(graph.edges(), before.edges());
}

#[test]
fn test_snapshots_are_copies() {
    struct Keep(Vec<Snapshot>);
    impl TraversalCallbacks for Keep {
        fn on_visit(&mut self, _node: NodeId, snapshot: &Snapshot) {
            self.0.push(snapshot.clone());
        }
    }

    let mut keep = Keep(Vec::new());
    run_dijkstra(
        &diamond(),
        DijkstraRequest::new(0),
        &mut keep,
        &mut Immediate,
    )
    .unwrap();

    // The first snapshot still shows the state at the first visit
    assert_eq!(keep.0[0].visited.len(), 1);
    assert!(keep.0[0].distance(3).is_infinite());
    assert_eq!(keep.0[3].visited.len(), 4);
}

#[test]
fn test_cancel_ends_run_without_finish() {
    let mut recorder = Recorder::default();
    let outcome = run_dijkstra(
        &diamond(),
        DijkstraRequest::new(0),
        &mut recorder,
        &mut CancelAfter(2),
    )
    .unwrap();

    assert!(outcome.is_cancelled());
    assert!(recorder.cancelled);
    assert!(recorder.finished.is_none());
    assert_eq!(recorder.events.last().unwrap(), "cancelled");
    assert_eq!(recorder.events.len(), 4);
}

#[test]
fn test_dangling_edge_is_skipped() {
    let mut graph = diamond();
    graph.edges.push(crate::graph::Edge::new(3, 50, 1.0));
    let result = run(&graph, 0, None);
    assert_eq!(result.distance(3), 8.0);
    assert!(!result.distances.contains_key(&50));
}

/// All-pairs reference distances by Floyd-Warshall
fn reference_distances(graph: &Graph, start: NodeId) -> Vec<f64> {
    let n = graph.node_count();
    let mut d = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in d.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for e in graph.edges() {
        let (a, b) = (e.a as usize, e.b as usize);
        d[a][b] = d[a][b].min(e.weight);
        d[b][a] = d[b][a].min(e.weight);
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if d[i][k] + d[k][j] < d[i][j] {
                    d[i][j] = d[i][k] + d[k][j];
                }
            }
        }
    }
    d[start as usize].clone()
}

#[test]
fn test_matches_reference_on_generated_graphs() {
    let mut seed: u64 = 0x9e37_79b9;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    for _ in 0..20 {
        let mut graph = Graph::new();
        let n = 3 + (next() % 10) as u32;
        for _ in 0..n {
            graph.add_node().unwrap();
        }
        for a in 0..n {
            for b in (a + 1)..n {
                if next() % 3 == 0 {
                    graph.add_edge(a, b, (next() % 20) as f64).unwrap();
                }
            }
        }

        let start = (next() % n as u64) as NodeId;
        let result = run(&graph, start, None);
        let expected = reference_distances(&graph, start);

        for id in 0..n {
            assert_eq!(result.distance(id), expected[id as usize]);
        }

        // Any reachable end: path weights sum to the distance
        for end in 0..n {
            let routed = run(&graph, start, Some(end));
            if !routed.is_reachable(end) {
                assert!(routed.path.is_empty());
                continue;
            }
            let sum: f64 = routed
                .path
                .windows(2)
                .map(|w| {
                    graph
                        .edges()
                        .iter()
                        .find(|e| e.connects(w[0], w[1]))
                        .unwrap()
                        .weight
                })
                .sum();
            assert_eq!(sum, routed.distance(end));
        }
    }
}
