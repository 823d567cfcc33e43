//! `rr-search` — pathfinding over a loaded [`RoadGraph`](rr_graph::RoadGraph).
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`engine`]   | `SearchEngine` trait, `SearchResult`, shared best-first loop |
//! | [`engines`]  | `Dijkstra`, `AStar`, `GreedyBestFirst`                     |
//! | [`registry`] | `AlgorithmRegistry`, `SearchRequest`                       |
//! | [`snap`]     | `NodeSnapper`, `CandidateLookup`                           |
//! | [`error`]    | `SearchError`, `EngineResult<T>`                           |
//!
//! All engines share one contract and one search loop; they differ only in
//! the priority assigned to frontier entries.  Edge weight is always
//! distance in kilometres.

pub mod engine;
pub mod engines;
pub mod error;
pub mod registry;
pub mod snap;


pub use engine::{MAX_ITERATIONS, SearchEngine, SearchResult};
pub use engines::{AStar, Dijkstra, GreedyBestFirst};
pub use error::{EngineResult, SearchError};
pub use registry::{AlgorithmRegistry, SearchRequest};
pub use snap::{CandidateLookup, DEFAULT_CANDIDATES, NodeSnapper};
