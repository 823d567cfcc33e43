//! Graph statistics and connectivity diagnostics.
//!
//! | Type          | Cost       | Used by                    |
//! |---------------|------------|----------------------------|
//! | `GraphStats`  | O(V)       | `graphStats` query         |
//! | `GraphReport` | O(V + E)   | `rr check`, reload logging |

use std::collections::BTreeMap;

use serde::Serialize;

use rr_core::NodeIdx;

use crate::RoadGraph;

/// Number of entries kept in [`GraphReport::degree_histogram`].
pub const HISTOGRAM_TOP: usize = 10;

// ── GraphStats ────────────────────────────────────────────────────────────────

/// Summary counts for a loaded graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes:     usize,
    /// Nodes with at least one outgoing edge.
    pub connected_nodes: usize,
    /// Nodes with no outgoing edge.
    pub isolated_nodes:  usize,
    /// Directed edge count.
    pub directed_edges:  usize,
    /// Directed edge count halved.  Fractional when one-way edges leave the
    /// directed count odd.
    pub total_edges:     f64,
}

impl GraphStats {
    pub fn of(graph: &RoadGraph) -> Self {
        let total_nodes = graph.node_count();
        let connected_nodes = (0..total_nodes)
            .filter(|&i| graph.out_degree(NodeIdx(i as u32)) > 0)
            .count();
        let directed_edges = graph.edge_count();
        Self {
            total_nodes,
            connected_nodes,
            isolated_nodes: total_nodes - connected_nodes,
            directed_edges,
            total_edges: directed_edges as f64 / 2.0,
        }
    }
}

// ── GraphReport ───────────────────────────────────────────────────────────────

/// Connectivity diagnostics.
///
/// Components are computed over the **undirected** view of the graph: a
/// one-way street still joins its two endpoints.  Nodes with no incident
/// edge at all are counted in `unlinked_nodes` and do not form components.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphReport {
    pub stats:            GraphStats,
    /// Nodes with neither incoming nor outgoing edges.
    pub unlinked_nodes:   usize,
    /// Component sizes, largest first.
    pub component_sizes:  Vec<usize>,
    /// `(degree, node count)` pairs for the highest undirected degrees
    /// present, highest first.
    pub degree_histogram: Vec<(usize, usize)>,
    /// Edge records dropped at load because an endpoint was unknown.
    pub skipped_edges:    usize,
}

impl GraphReport {
    pub fn of(graph: &RoadGraph) -> Self {
        let n = graph.node_count();

        // Union-find over the undirected view.
        let mut parent: Vec<u32> = (0..n as u32).collect();
        let mut degree = vec![0usize; n];
        for e in 0..graph.edge_count() {
            let a = graph.edge_from[e].0;
            let b = graph.edge_to[e].0;
            degree[a as usize] += 1;
            degree[b as usize] += 1;
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra.max(rb) as usize] = ra.min(rb);
            }
        }

        let mut sizes = vec![0usize; n];
        let mut unlinked_nodes = 0;
        for i in 0..n as u32 {
            if degree[i as usize] == 0 {
                unlinked_nodes += 1;
                continue;
            }
            let root = find(&mut parent, i);
            sizes[root as usize] += 1;
        }
        let mut component_sizes: Vec<usize> = sizes.into_iter().filter(|&s| s > 0).collect();
        component_sizes.sort_unstable_by(|a, b| b.cmp(a));

        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for &d in &degree {
            *counts.entry(d).or_default() += 1;
        }
        let degree_histogram: Vec<(usize, usize)> =
            counts.into_iter().rev().take(HISTOGRAM_TOP).collect();

        Self {
            stats: GraphStats::of(graph),
            unlinked_nodes,
            component_sizes,
            degree_histogram,
            skipped_edges: graph.skipped_edges(),
        }
    }

    pub fn component_count(&self) -> usize {
        self.component_sizes.len()
    }

    /// Size of the largest component, 0 for an edgeless graph.
    pub fn largest_component(&self) -> usize {
        self.component_sizes.first().copied().unwrap_or(0)
    }
}

/// Root of `x` with path halving.
fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        let grand = parent[parent[x as usize] as usize];
        parent[x as usize] = grand;
        x = grand;
    }
    x
}
