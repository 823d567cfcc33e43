//! Ingestion error type.  Every variant is fatal for the batch run.

use thiserror::Error;

use rr_core::CoreError;

/// Errors produced by `rr-ingest`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("map document has no point collection")]
    MissingPoints,

    #[error("map document has no way collection")]
    MissingWays,

    #[error("point {id}: {source}")]
    BadPoint {
        id: String,
        #[source]
        source: CoreError,
    },

    #[error("unsupported map format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OSM XML parse error: {0}")]
    Xml(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "pbf")]
    #[error("OSM PBF parse error: {0}")]
    Pbf(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
