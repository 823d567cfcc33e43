//! Pick a reader by file extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{IngestError, IngestResult, RawMap};

/// Supported raw map encodings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapFormat {
    Json,
    OsmXml,
    #[cfg(feature = "pbf")]
    Pbf,
}

impl MapFormat {
    /// Infer the format from a path's extension (`.json`, `.osm`, `.xml`,
    /// and `.pbf` with the `pbf` feature).
    pub fn from_path(path: &Path) -> IngestResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(MapFormat::Json),
            "osm" | "xml" => Ok(MapFormat::OsmXml),
            #[cfg(feature = "pbf")]
            "pbf" => Ok(MapFormat::Pbf),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a raw map from `path`, choosing the reader from its extension.
pub fn load_raw_map(path: &Path) -> IngestResult<RawMap> {
    match MapFormat::from_path(path)? {
        MapFormat::Json => crate::read_json(BufReader::new(File::open(path)?)),
        MapFormat::OsmXml => crate::read_osm_xml(BufReader::new(File::open(path)?)),
        #[cfg(feature = "pbf")]
        MapFormat::Pbf => crate::pbf::read_pbf(path),
    }
}
