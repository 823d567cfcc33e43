//! The three registered engines.
//!
//! | Engine            | Priority                      | Optimal |
//! |-------------------|-------------------------------|---------|
//! | `Dijkstra`        | g                             | yes     |
//! | `AStar`           | g + great-circle(node, goal)  | yes     |
//! | `GreedyBestFirst` | great-circle(node, goal)      | no      |
//!
//! The great-circle distance never exceeds the road distance between two
//! nodes, so the A* heuristic is admissible and consistent and A* returns the
//! same distance as Dijkstra.

use rr_core::NodeIdx;
use rr_graph::RoadGraph;

use crate::engine::{MAX_ITERATIONS, SearchEngine, SearchResult, best_first};

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Uniform-cost search on accumulated distance.
#[derive(Clone, Copy, Debug)]
pub struct Dijkstra {
    pub max_iterations: usize,
}

impl Dijkstra {
    pub const NAME: &'static str = "dijkstra";

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::with_max_iterations(MAX_ITERATIONS)
    }
}

impl SearchEngine for Dijkstra {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn find_path(&self, graph: &RoadGraph, start: NodeIdx, goal: NodeIdx) -> Option<SearchResult> {
        let result = best_first(graph, start, goal, self.max_iterations, |g, _| g);
        log_outcome(Self::NAME, &result);
        result
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct AStar {
    pub max_iterations: usize,
}

impl AStar {
    pub const NAME: &'static str = "astar";

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for AStar {
    fn default() -> Self {
        Self::with_max_iterations(MAX_ITERATIONS)
    }
}

impl SearchEngine for AStar {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn find_path(&self, graph: &RoadGraph, start: NodeIdx, goal: NodeIdx) -> Option<SearchResult> {
        if !graph.contains(goal) {
            return None;
        }
        let target = graph.pos(goal);
        let result = best_first(graph, start, goal, self.max_iterations, |g, node| {
            g + graph.pos(node).distance_km(target)
        });
        log_outcome(Self::NAME, &result);
        result
    }
}

// ── Greedy best-first ─────────────────────────────────────────────────────────

/// Expands whichever frontier node looks closest to the goal, ignoring the
/// distance already travelled.
///
/// **Approximate.**  Usually expands far fewer nodes than A*, but the path
/// it returns can be longer than the shortest one.  It shares the registry
/// and result contract with the exact engines; callers that need the
/// shortest route should request `astar` or `dijkstra`.
#[derive(Clone, Copy, Debug)]
pub struct GreedyBestFirst {
    pub max_iterations: usize,
}

impl GreedyBestFirst {
    pub const NAME: &'static str = "greedy_best_first";

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for GreedyBestFirst {
    fn default() -> Self {
        Self::with_max_iterations(MAX_ITERATIONS)
    }
}

impl SearchEngine for GreedyBestFirst {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn find_path(&self, graph: &RoadGraph, start: NodeIdx, goal: NodeIdx) -> Option<SearchResult> {
        if !graph.contains(goal) {
            return None;
        }
        let target = graph.pos(goal);
        let result = best_first(graph, start, goal, self.max_iterations, |_, node| {
            graph.pos(node).distance_km(target)
        });
        log_outcome(Self::NAME, &result);
        result
    }
}

fn log_outcome(engine: &str, result: &Option<SearchResult>) {
    match result {
        Some(r) => log::debug!(
            "{engine}: {} steps, {:.3} km, {} iterations, {} expanded in {:?}",
            r.steps,
            r.distance_km,
            r.iterations,
            r.expanded,
            r.elapsed,
        ),
        None => log::debug!("{engine}: no path"),
    }
}
