//! `rr-graph` — the in-memory road graph every query runs against.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`graph`]  | `RoadGraph` (CSR + id interning), `RoadGraphBuilder`       |
//! | [`loader`] | `GraphLoader` — atomically swapped `Arc<RoadGraph>`        |
//! | [`stats`]  | `GraphStats`, `GraphReport` (components, degree histogram) |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                             |

pub mod error;
pub mod graph;
pub mod loader;
pub mod stats;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
pub use loader::GraphLoader;
pub use stats::{GraphReport, GraphStats};
