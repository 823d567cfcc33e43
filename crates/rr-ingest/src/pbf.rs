//! OSM PBF reader, enabled with the `pbf` Cargo feature.
//!
//! # What is loaded
//!
//! Every node and every way with its full tag set.  Filtering is left to
//! [`crate::ingest`] so that PBF and XML input go through the same rules.
//!
//! # Memory note
//!
//! All points of the extract are buffered because ways reference them by
//! id.  For a city extract that is a few million entries.

use std::path::Path;

use osmpbf::{Element, ElementReader};

use rr_core::WayTags;

use crate::{IngestError, IngestResult, RawMap, RawPoint, RawWay};

/// Load every node and way from an OSM PBF file.
///
/// # Errors
///
/// Returns [`IngestError::Pbf`] on open or decode errors.  An extract
/// without nodes or ways reads as empty collections.
pub fn read_pbf(path: &Path) -> IngestResult<RawMap> {
    let reader = ElementReader::from_path(path).map_err(|e| IngestError::Pbf(e.to_string()))?;

    let mut map = RawMap::default();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                map.points.push(RawPoint { id: n.id().to_string(), lat: n.lat(), lon: n.lon() });
            }
            Element::DenseNode(n) => {
                map.points.push(RawPoint { id: n.id().to_string(), lat: n.lat(), lon: n.lon() });
            }
            Element::Way(w) => {
                map.ways.push(RawWay {
                    id:   w.id().to_string(),
                    refs: w.refs().map(|r| r.to_string()).collect(),
                    tags: WayTags::from_pairs(w.tags()),
                });
            }
            _ => {}
        })
        .map_err(|e| IngestError::Pbf(e.to_string()))?;

    log::info!("pbf: read {} points, {} ways", map.points.len(), map.ways.len());
    Ok(map)
}
