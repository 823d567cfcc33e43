//! `rr-query` — the boundary a transport layer calls into.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`service`] | `RouteService` (`find_route`, `list_algorithms`, `reload_graph`, `graph_stats`, `check_graph`) |
//! | [`route`]   | `RouteRequest`, `RouteResponse`, `LatLon`                      |
//! | [`import`]  | `import_map` — ingest a raw map and replace the stored graph   |
//! | [`lookup`]  | `StoreLookup` — snapping candidates from a `GraphStore`        |
//! | [`config`]  | `QueryConfig`                                                  |
//! | [`error`]   | `QueryError` (with stable codes), `QueryResult<T>`             |
//!
//! Every operation returns a [`QueryResult`]; nothing here panics on bad
//! input or an unavailable store.

pub mod config;
pub mod error;
pub mod import;
pub mod lookup;
pub mod route;
pub mod service;


pub use config::QueryConfig;
pub use error::{QueryError, QueryResult};
pub use import::import_map;
pub use lookup::StoreLookup;
pub use route::{LatLon, NodeView, RouteRequest, RouteResponse};
pub use service::RouteService;

pub use rr_graph::{GraphReport, GraphStats};
pub use rr_ingest::IngestStats;
