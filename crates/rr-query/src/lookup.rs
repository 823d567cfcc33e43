//! Snapping candidates from the persisted store's nearest-neighbour index.

use rr_core::GeoPoint;
use rr_search::CandidateLookup;
use rr_store::{GraphStore, StoreError};

pub struct StoreLookup<'a>(pub &'a dyn GraphStore);

impl CandidateLookup for StoreLookup<'_> {
    type Error = StoreError;

    fn nearest_ids(&self, pos: GeoPoint, k: usize) -> Result<Vec<String>, StoreError> {
        Ok(self.0.nearest_nodes(pos, k)?.into_iter().map(|n| n.id).collect())
    }
}
