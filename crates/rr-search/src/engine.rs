//! The engine contract and the best-first loop every engine runs.
//!
//! # Skeleton
//!
//! ```text
//! g[start] = 0, push (key(0, start), start)
//! loop while frontier non-empty and iterations < cap:
//!     pop minimum (priority, node)
//!     node == goal        → rebuild path from predecessor edges
//!     node explored       → skip stale entry
//!     mark explored
//!     for each edge to an unexplored neighbour:
//!         t = g[node] + edge.distance_km
//!         t < g[neighbour] → record predecessor, push (key(t, neighbour), neighbour)
//! ```
//!
//! `key` is the only variant-specific piece.  Equal priorities pop in
//! ascending `NodeIdx` order, so results are deterministic for one graph.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use rr_core::{EdgeIdx, NodeIdx};
use rr_graph::RoadGraph;

/// Frontier pops allowed before a search gives up as unreachable.
pub const MAX_ITERATIONS: usize = 200_000;

// ── SearchResult ──────────────────────────────────────────────────────────────

/// A found path and the statistics of the search that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Nodes from start to goal inclusive.
    pub path: Vec<NodeIdx>,
    /// Edge count along `path`.
    pub steps: usize,
    /// Sum of traversed edge distances.
    pub distance_km: f64,
    /// Sum of traversed edge costs, in seconds.
    pub duration_s: f64,
    /// Wall-clock compute time.
    pub elapsed: Duration,
    /// Frontier pops, including stale entries.
    pub iterations: usize,
    /// Nodes marked explored.
    pub expanded: usize,
}

impl SearchResult {
    /// The single-node result for `start == goal`.
    pub fn trivial(node: NodeIdx) -> Self {
        Self {
            path: vec![node],
            steps: 0,
            distance_km: 0.0,
            duration_s: 0.0,
            elapsed: Duration::ZERO,
            iterations: 0,
            expanded: 0,
        }
    }
}

// ── SearchEngine trait ────────────────────────────────────────────────────────

/// Pluggable pathfinding engine.
///
/// # Contract
///
/// - `None` when `start` or `goal` is not a node of `graph`, when the goal
///   is unreachable, or when the iteration cap is hit.
/// - `start == goal` returns [`SearchResult::trivial`] without searching.
/// - The graph is never mutated; engines are `Send + Sync` so one instance
///   serves concurrent queries against shared snapshots.
pub trait SearchEngine: Send + Sync {
    /// Registry key.  Non-empty, no whitespace.
    fn name(&self) -> &str;

    fn find_path(&self, graph: &RoadGraph, start: NodeIdx, goal: NodeIdx) -> Option<SearchResult>;
}

// ── Frontier entry ────────────────────────────────────────────────────────────

/// Heap entry ordered by priority, then node index.  `f64` has no total
/// order of its own; `total_cmp` supplies one.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    priority: f64,
    node:     NodeIdx,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.node.cmp(&other.node))
    }
}

// ── Shared loop ───────────────────────────────────────────────────────────────

/// Run the best-first skeleton with priority function `key(g, node)`, where
/// `g` is the accumulated distance to `node` along the best known path.
pub(crate) fn best_first<K>(
    graph: &RoadGraph,
    start: NodeIdx,
    goal: NodeIdx,
    max_iterations: usize,
    key: K,
) -> Option<SearchResult>
where
    K: Fn(f64, NodeIdx) -> f64,
{
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(SearchResult::trivial(start));
    }

    let t0 = Instant::now();
    let n = graph.node_count();
    // g[v] = best known accumulated distance to v.
    let mut g = vec![f64::INFINITY; n];
    // prev_edge[v] = edge that reached v on the best known path.
    let mut prev_edge = vec![EdgeIdx::INVALID; n];
    let mut explored = vec![false; n];

    g[start.index()] = 0.0;
    let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
    heap.push(Reverse(QueueEntry { priority: key(0.0, start), node: start }));

    let mut iterations = 0;
    let mut expanded = 0;

    while iterations < max_iterations {
        let Some(Reverse(QueueEntry { node, .. })) = heap.pop() else {
            break;
        };
        iterations += 1;

        if node == goal {
            let mut result = reconstruct(graph, &prev_edge, start, goal);
            result.elapsed = t0.elapsed();
            result.iterations = iterations;
            result.expanded = expanded;
            return Some(result);
        }

        if explored[node.index()] {
            continue;
        }
        explored[node.index()] = true;
        expanded += 1;

        let base = g[node.index()];
        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            if explored[neighbor.index()] {
                continue;
            }
            let tentative = base + graph.edge_distance_km[edge.index()];
            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse(QueueEntry { priority: key(tentative, neighbor), node: neighbor }));
            }
        }
    }

    if iterations >= max_iterations {
        log::debug!(
            "search: gave up after {iterations} iterations ({} -> {})",
            graph.key(start),
            graph.key(goal),
        );
    }
    None
}

/// Follow predecessor edges back from `goal`, then sum distance and cost
/// forwards along the path.
fn reconstruct(graph: &RoadGraph, prev_edge: &[EdgeIdx], start: NodeIdx, goal: NodeIdx) -> SearchResult {
    let mut edges = Vec::new();
    let mut cur = goal;
    while cur != start {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();

    let mut path = Vec::with_capacity(edges.len() + 1);
    path.push(start);
    let mut distance_km = 0.0;
    let mut cost_h = 0.0;
    for &e in &edges {
        path.push(graph.edge_to[e.index()]);
        distance_km += graph.edge_distance_km[e.index()];
        cost_h += graph.edge_cost_h[e.index()];
    }

    SearchResult {
        path,
        steps: edges.len(),
        distance_km,
        duration_s: cost_h * 3600.0,
        elapsed: Duration::ZERO,
        iterations: 0,
        expanded: 0,
    }
}
