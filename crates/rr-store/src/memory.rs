//! In-memory store backed by `Vec`s and an R-tree.
//!
//! Intended for tests, demos and short-lived tools.  Nothing is persisted
//! across process restarts.
//!
//! # Spatial index
//!
//! The R-tree holds each node as a point on the unit sphere.  Chord length
//! grows strictly with great-circle distance, so the tree's nearest-neighbour
//! order is already the haversine order at every latitude.

use parking_lot::RwLock;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use rr_core::{Edge, GeoPoint, Node, Way};

use crate::{GraphStore, StoreError, StoreResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a unit-sphere point and the position of the
/// node in `Inner::nodes`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    slot:  usize,
}

/// Earth-centred unit vector of `pos`.
fn unit_vector(pos: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (pos.lat.to_radians(), pos.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.point
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    nodes:      Vec<Node>,
    ways:       Vec<Way>,
    edges:      Vec<Edge>,
    node_slot:  FxHashMap<String, usize>,
    way_slot:   FxHashMap<String, usize>,
    spatial:    RTree<NodeEntry>,
}

/// A [`GraphStore`] that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStore for MemoryStore {
    fn replace_all(&self, nodes: &[Node], ways: &[Way], edges: &[Edge]) -> StoreResult<()> {
        // Build the replacement completely before taking the write lock, so a
        // duplicate id leaves the current contents untouched.
        let mut node_slot = FxHashMap::default();
        for (i, n) in nodes.iter().enumerate() {
            if node_slot.insert(n.id.clone(), i).is_some() {
                return Err(StoreError::DuplicateId { collection: "nodes", id: n.id.clone() });
            }
        }
        let mut way_slot = FxHashMap::default();
        for (i, w) in ways.iter().enumerate() {
            if way_slot.insert(w.id.clone(), i).is_some() {
                return Err(StoreError::DuplicateId { collection: "ways", id: w.id.clone() });
            }
        }

        let entries: Vec<NodeEntry> = nodes
            .iter()
            .enumerate()
            .map(|(slot, n)| NodeEntry { point: unit_vector(n.pos), slot })
            .collect();

        let replacement = Inner {
            nodes: nodes.to_vec(),
            ways: ways.to_vec(),
            edges: edges.to_vec(),
            node_slot,
            way_slot,
            spatial: RTree::bulk_load(entries),
        };
        *self.inner.write() = replacement;

        log::debug!(
            "memory store: replaced with {} nodes, {} ways, {} edges",
            nodes.len(),
            ways.len(),
            edges.len()
        );
        Ok(())
    }

    fn nodes(&self) -> StoreResult<Vec<Node>> {
        Ok(self.inner.read().nodes.clone())
    }

    fn edges(&self) -> StoreResult<Vec<Edge>> {
        Ok(self.inner.read().edges.clone())
    }

    fn ways(&self) -> StoreResult<Vec<Way>> {
        Ok(self.inner.read().ways.clone())
    }

    fn node(&self, id: &str) -> StoreResult<Option<Node>> {
        let inner = self.inner.read();
        Ok(inner.node_slot.get(id).map(|&i| inner.nodes[i].clone()))
    }

    fn way(&self, id: &str) -> StoreResult<Option<Way>> {
        let inner = self.inner.read();
        Ok(inner.way_slot.get(id).map(|&i| inner.ways[i].clone()))
    }

    fn nearest_nodes(&self, pos: GeoPoint, k: usize) -> StoreResult<Vec<Node>> {
        let inner = self.inner.read();
        Ok(inner
            .spatial
            .nearest_neighbor_iter(&unit_vector(pos))
            .take(k)
            .map(|e| inner.nodes[e.slot].clone())
            .collect())
    }
}
