//! Search-subsystem error type.
//!
//! A search that finds no path is not an error: engines return `None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("algorithm {0:?} is not registered")]
    AlgorithmNotRegistered(String),

    #[error("invalid search input: missing {0}")]
    InvalidInput(&'static str),

    /// Registering an engine whose name cannot be addressed.
    #[error("invalid algorithm name {name:?}: {reason}")]
    InvalidAlgorithm { name: String, reason: &'static str },
}

pub type EngineResult<T> = Result<T, SearchError>;
