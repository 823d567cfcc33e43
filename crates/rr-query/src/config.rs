//! Query-layer settings.

use serde::{Deserialize, Serialize};

use rr_search::{DEFAULT_CANDIDATES, MAX_ITERATIONS};

/// Missing fields take their defaults, so a partial TOML `[query]` table
/// is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Engine used when a request names none.
    pub default_algorithm: String,
    /// Snapping candidates fetched per coordinate endpoint.
    pub snap_candidates:   usize,
    /// Frontier pops before a search reports no path.
    pub max_iterations:    usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_algorithm: "astar".to_owned(),
            snap_candidates:   DEFAULT_CANDIDATES,
            max_iterations:    MAX_ITERATIONS,
        }
    }
}
