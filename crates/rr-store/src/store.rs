//! The `GraphStore` trait implemented by all storage backends.

use rr_core::{Edge, GeoPoint, Node, Way};

use crate::StoreResult;

/// Durable record store for one road graph.
///
/// # Consistency
///
/// [`replace_all`](Self::replace_all) drops and recreates every collection
/// and is all-or-nothing: on error the previously stored graph is left
/// untouched.  Reads return records in insertion order.
///
/// # Thread safety
///
/// Implementations are `Send + Sync` so a single store can serve reloads
/// and snapping lookups from any thread.
pub trait GraphStore: Send + Sync {
    /// Replace the whole persisted graph.  Node and way ids must be unique.
    fn replace_all(&self, nodes: &[Node], ways: &[Way], edges: &[Edge]) -> StoreResult<()>;

    /// Every node record.
    fn nodes(&self) -> StoreResult<Vec<Node>>;

    /// Every edge record.
    fn edges(&self) -> StoreResult<Vec<Edge>>;

    /// Every way record.
    fn ways(&self) -> StoreResult<Vec<Way>>;

    /// Exact lookup by node id.
    fn node(&self, id: &str) -> StoreResult<Option<Node>>;

    /// Exact lookup by way id.
    fn way(&self, id: &str) -> StoreResult<Option<Way>>;

    /// Up to `k` stored nodes closest to `pos`, nearest first.
    fn nearest_nodes(&self, pos: GeoPoint, k: usize) -> StoreResult<Vec<Node>>;
}

/// Stable nearest-first ordering by great-circle distance.
#[cfg(feature = "sqlite")]
pub(crate) fn sort_by_distance(nodes: &mut [Node], pos: GeoPoint) {
    nodes.sort_by(|a, b| pos.distance_km(a.pos).total_cmp(&pos.distance_km(b.pos)));
}
