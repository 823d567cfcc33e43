//! Error types for rr-store.

use thiserror::Error;

/// Errors raised by a [`crate::GraphStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate {collection} id {id:?}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("corrupt {collection} record {id:?}: {reason}")]
    Corrupt {
        collection: &'static str,
        id:         String,
        reason:     String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
