//! Batch import: raw map → ingester → store.

use rr_ingest::{IngestStats, RawMap, ingest};
use rr_store::GraphStore;

use crate::QueryResult;

/// Ingest `raw` and replace everything in `store` with the result.
///
/// Ingestion errors abort before the store is touched; a failed write
/// leaves the previously stored graph in place.  Already loaded graph
/// snapshots are not refreshed; call `RouteService::reload_graph` for that.
pub fn import_map(store: &dyn GraphStore, raw: &RawMap) -> QueryResult<IngestStats> {
    let out = ingest(raw)?;
    store.replace_all(&out.nodes, &out.ways, &out.edges)?;
    log::info!(
        "import: stored {} nodes, {} ways, {} edges",
        out.nodes.len(),
        out.ways.len(),
        out.edges.len(),
    );
    Ok(out.stats)
}
