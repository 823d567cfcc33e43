//! `rr-core` — foundational types for the `rust_route` routing engine.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and a single mandatory external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`ids`]   | `NodeIdx`, `EdgeIdx` (dense arena indices)                  |
//! | [`geo`]   | `GeoPoint`, haversine distance in kilometres                |
//! | [`road`]  | `RoadClass`, cost model speeds, snapping priorities         |
//! | [`tags`]  | `WayTags` — typed view of a way's tag dictionary            |
//! | [`model`] | `Node`, `Edge`, `Way` — persisted graph records             |
//! | [`error`] | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod road;
pub mod tags;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeIdx, NodeIdx};
pub use model::{Edge, Node, Way};
pub use road::RoadClass;
pub use tags::WayTags;
