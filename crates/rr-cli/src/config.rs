//! TOML configuration file.
//!
//! ```toml
//! database = "graph.db"
//!
//! [query]
//! default_algorithm = "astar"
//! snap_candidates   = 10
//! max_iterations    = 200000
//! ```
//!
//! Every key is optional.  Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use rr_query::QueryConfig;

/// Database used when neither the file nor `--database` names one.
pub const DEFAULT_DATABASE: &str = "graph.db";

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub query:    QueryConfig,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// `path` if given, otherwise all defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn database_or_default(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}
