//! Graph-subsystem error type.

use thiserror::Error;

use rr_store::StoreError;

/// Errors produced by `rr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("graph has not been loaded")]
    NotLoaded,
}

pub type GraphResult<T> = Result<T, GraphError>;
