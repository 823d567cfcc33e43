//! `rr-ingest` — turn raw map survey data into graph records.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`raw`]      | `RawMap`, `RawPoint`, `RawWay` — format-neutral input    |
//! | [`ingester`] | `ingest`, `IngestOutput`, `IngestStats`                  |
//! | [`json`]     | `read_json` — JSON documents                             |
//! | [`osm_xml`]  | `read_osm_xml` — OSM XML extracts                        |
//! | [`pbf`]      | `read_pbf` (feature = `"pbf"` only)                      |
//! | [`source`]   | `MapFormat`, `load_raw_map` — pick a reader by extension |
//! | [`error`]    | `IngestError`, `IngestResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Per-way segment construction on Rayon (default).        |
//! | `pbf`      | Enables OSM PBF input via the `osmpbf` crate.           |

pub mod error;
pub mod ingester;
pub mod json;
pub mod osm_xml;
pub mod raw;
pub mod source;

#[cfg(feature = "pbf")]
pub mod pbf;


pub use error::{IngestError, IngestResult};
pub use ingester::{ingest, IngestOutput, IngestStats, MIN_SEGMENT_KM};
pub use json::read_json;
pub use osm_xml::read_osm_xml;
pub use raw::{RawMap, RawPoint, RawWay};
pub use source::{load_raw_map, MapFormat};
