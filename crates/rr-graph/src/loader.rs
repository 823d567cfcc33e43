//! Snapshot loader: reads the whole store into a [`RoadGraph`] and publishes
//! it atomically.
//!
//! Searches take an `Arc<RoadGraph>` snapshot at query start and never see a
//! partially rebuilt graph.  A reload builds the replacement off to the side
//! and swaps the pointer under a short write lock; in-flight searches keep
//! their old snapshot alive until they finish.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use rr_store::GraphStore;

use crate::{GraphError, GraphResult, RoadGraph};

#[derive(Default)]
pub struct GraphLoader {
    current: RwLock<Option<Arc<RoadGraph>>>,
}

impl GraphLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every node and edge from `store`, build a fresh graph, and make
    /// it the current snapshot.
    ///
    /// On a store error the previous snapshot (if any) stays current.
    pub fn load_all(&self, store: &dyn GraphStore) -> GraphResult<Arc<RoadGraph>> {
        let t0 = Instant::now();
        let nodes = store.nodes()?;
        let edges = store.edges()?;
        let graph = Arc::new(RoadGraph::from_records(&nodes, &edges));

        *self.current.write() = Some(Arc::clone(&graph));

        log::info!(
            "graph: loaded {} nodes, {} directed edges in {:.1} ms",
            graph.node_count(),
            graph.edge_count(),
            t0.elapsed().as_secs_f64() * 1e3,
        );
        Ok(graph)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// The current snapshot, if a load has completed.
    pub fn snapshot(&self) -> Option<Arc<RoadGraph>> {
        self.current.read().clone()
    }

    /// The current snapshot, or [`GraphError::NotLoaded`].
    pub fn require(&self) -> GraphResult<Arc<RoadGraph>> {
        self.snapshot().ok_or(GraphError::NotLoaded)
    }

    /// The current snapshot, loading from `store` first if none exists.
    ///
    /// Two callers racing on an unloaded graph may both load; the later swap
    /// wins and both graphs are equivalent.
    pub fn get_or_load(&self, store: &dyn GraphStore) -> GraphResult<Arc<RoadGraph>> {
        match self.snapshot() {
            Some(g) => Ok(g),
            None => self.load_all(store),
        }
    }
}
