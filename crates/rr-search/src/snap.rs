//! Resolve an arbitrary coordinate to a usable route endpoint.
//!
//! The nearest stored node is often a poor endpoint: it may sit on a
//! footpath, or belong to a stored graph newer than the loaded one.  The
//! snapper asks the spatial index for several candidates and picks the one
//! on the most important road.
//!
//! # Selection
//!
//! 1. Fetch up to `k` nearest candidate ids, nearest first.
//! 2. Keep candidates present in the loaded graph.
//! 3. Score each by the highest [`RoadClass::snap_priority`] among its
//!    outgoing edges; candidates without outgoing edges are not scored.
//! 4. Highest score wins; ties keep the nearer candidate.
//! 5. If no candidate scores above zero, return the nearest in-graph
//!    candidate, even one without outgoing edges.
//!
//! `None` only when no candidate is in the graph.
//!
//! [`RoadClass::snap_priority`]: rr_core::RoadClass::snap_priority

use rr_core::{GeoPoint, NodeIdx};
use rr_graph::RoadGraph;

/// Candidates requested from the spatial index per endpoint.
pub const DEFAULT_CANDIDATES: usize = 10;

/// Spatial candidate source, typically backed by the graph store.
pub trait CandidateLookup {
    type Error;

    /// Ids of up to `k` stored nodes closest to `pos`, nearest first.
    fn nearest_ids(&self, pos: GeoPoint, k: usize) -> Result<Vec<String>, Self::Error>;
}

#[derive(Clone, Copy, Debug)]
pub struct NodeSnapper {
    pub candidates: usize,
}

impl Default for NodeSnapper {
    fn default() -> Self {
        Self { candidates: DEFAULT_CANDIDATES }
    }
}

impl NodeSnapper {
    pub fn new(candidates: usize) -> Self {
        Self { candidates }
    }

    /// Best endpoint near `pos`.  Lookup failures propagate unchanged.
    pub fn best_endpoint_for<L>(
        &self,
        pos: GeoPoint,
        graph: &RoadGraph,
        lookup: &L,
    ) -> Result<Option<NodeIdx>, L::Error>
    where
        L: CandidateLookup + ?Sized,
    {
        let in_graph: Vec<NodeIdx> = lookup
            .nearest_ids(pos, self.candidates)?
            .iter()
            .filter_map(|id| graph.index_of(id))
            .collect();

        let picked = pick(graph, &in_graph);
        match picked {
            Some(node) => log::debug!(
                "snap: ({:.6}, {:.6}) -> {} from {} in-graph candidates",
                pos.lat,
                pos.lon,
                graph.key(node),
                in_graph.len(),
            ),
            None => log::debug!("snap: ({:.6}, {:.6}) has no in-graph candidate", pos.lat, pos.lon),
        }
        Ok(picked)
    }
}

/// Selection over in-graph candidates, nearest first.
fn pick(graph: &RoadGraph, candidates: &[NodeIdx]) -> Option<NodeIdx> {
    let mut best: Option<(NodeIdx, u8)> = None;
    for &node in candidates {
        let Some(score) = graph
            .out_edges(node)
            .map(|e| graph.edge_class[e.index()].snap_priority())
            .max()
        else {
            continue;
        };
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((node, score));
        }
    }

    match best {
        Some((node, score)) if score > 0 => Some(node),
        _ => candidates.first().copied(),
    }
}
