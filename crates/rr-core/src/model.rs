//! Persisted graph records.
//!
//! These are the rows the ingester produces and the store keeps.  They are
//! created once per ingestion run and never mutated afterwards; the
//! in-memory graph is built from them but uses its own columnar layout.

use crate::{GeoPoint, RoadClass, WayTags};

/// A geographic point used as a graph vertex.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Stable token from source data.
    pub id:  String,
    pub pos: GeoPoint,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { id: id.into(), pos: GeoPoint::new(lat, lon) }
    }
}

/// A directed, weighted road segment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:        String,
    pub to:          String,
    /// Great-circle length in kilometres.
    pub distance_km: f64,
    /// Traversal time in hours (`distance_km / class.speed_kmh()`).
    pub cost_h:      f64,
    pub class:       RoadClass,
    /// Id of the way this segment came from.
    pub way_id:      String,
}

impl Edge {
    /// Edge in the opposite direction with identical distance and cost.
    pub fn reversed(&self) -> Edge {
        Edge {
            from:        self.to.clone(),
            to:          self.from.clone(),
            distance_km: self.distance_km,
            cost_h:      self.cost_h,
            class:       self.class,
            way_id:      self.way_id.clone(),
        }
    }
}

/// An accepted source way, kept for provenance only.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    pub id:    String,
    pub nodes: Vec<String>,
    pub tags:  WayTags,
}
