//! Query-boundary error taxonomy.
//!
//! | Variant                  | Code                       | Client error |
//! |--------------------------|----------------------------|--------------|
//! | `InvalidInput`           | `invalid_input`            | yes          |
//! | `NodeNotFound`           | `node_not_found`           | yes          |
//! | `AlgorithmNotRegistered` | `algorithm_not_registered` | yes          |
//! | `NoPathFound`            | `no_path_found`            | yes          |
//! | `Ingest`                 | `ingest_error`             | no           |
//! | `Store`                  | `store_error`              | no           |
//! | `Graph`                  | `graph_error`              | no           |

use thiserror::Error;

use rr_graph::GraphError;
use rr_ingest::IngestError;
use rr_search::SearchError;
use rr_store::StoreError;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("algorithm {0:?} is not registered")]
    AlgorithmNotRegistered(String),

    #[error("no path found from {start} to {goal}")]
    NoPathFound { start: String, goal: String },

    #[error("ingestion failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("graph store error: {0}")]
    Store(#[from] StoreError),

    #[error("graph error: {0}")]
    Graph(GraphError),
}

impl QueryError {
    /// Stable snake_case token for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidInput(_)           => "invalid_input",
            QueryError::NodeNotFound(_)           => "node_not_found",
            QueryError::AlgorithmNotRegistered(_) => "algorithm_not_registered",
            QueryError::NoPathFound { .. }        => "no_path_found",
            QueryError::Ingest(_)                 => "ingest_error",
            QueryError::Store(_)                  => "store_error",
            QueryError::Graph(_)                  => "graph_error",
        }
    }

    /// `true` when the caller can fix the request; `false` for faults on
    /// the serving side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidInput(_)
                | QueryError::NodeNotFound(_)
                | QueryError::AlgorithmNotRegistered(_)
                | QueryError::NoPathFound { .. }
        )
    }
}

impl From<GraphError> for QueryError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Store(inner) => QueryError::Store(inner),
            other => QueryError::Graph(other),
        }
    }
}

impl From<SearchError> for QueryError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::AlgorithmNotRegistered(name) => QueryError::AlgorithmNotRegistered(name),
            other => QueryError::InvalidInput(other.to_string()),
        }
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
