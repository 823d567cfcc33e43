//! JSON map documents.
//!
//! ```json
//! {
//!   "points": [{ "id": "1", "lat": 21.01, "lon": 105.85 }],
//!   "ways":   [{ "id": "w1", "refs": ["1", "2"], "tags": { "highway": "primary" } }]
//! }
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::{IngestError, IngestResult, RawMap, RawPoint, RawWay};

#[derive(Deserialize)]
struct JsonDoc {
    points: Option<Vec<RawPoint>>,
    ways:   Option<Vec<RawWay>>,
}

/// Parse a JSON map document.  A document without a `points` or `ways`
/// key is rejected rather than treated as empty.
pub fn read_json<R: Read>(reader: R) -> IngestResult<RawMap> {
    let doc: JsonDoc = serde_json::from_reader(reader)?;
    Ok(RawMap {
        points: doc.points.ok_or(IngestError::MissingPoints)?,
        ways:   doc.ways.ok_or(IngestError::MissingWays)?,
    })
}
