//! `rr-store` — durable record store for nodes, edges and ways.
//!
//! The routing core only talks to storage through the [`GraphStore`] trait:
//! one transactional bulk replace at ingestion time, bulk reads at graph
//! load time, and id / nearest-neighbour lookups at query time.
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`store`]  | `GraphStore` trait                                     |
//! | [`memory`] | `MemoryStore` — R-tree backed, for tests and demos     |
//! | [`sqlite`] | `SqliteStore` (feature = `"sqlite"`, on by default)    |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                         |

pub mod error;
pub mod memory;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::GraphStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
