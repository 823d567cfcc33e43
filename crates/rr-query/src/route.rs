//! Request and response shapes of the route query.

use serde::{Deserialize, Serialize};

use rr_core::GeoPoint;

/// A coordinate as supplied by clients.  `lng` is accepted for `lon`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for LatLon {
    fn from(p: GeoPoint) -> Self {
        Self { lat: p.lat, lon: p.lon }
    }
}

/// One route query.  Each endpoint is given either as a node id or as a
/// coordinate; when both are present the coordinate is snapped and the id
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_id:  Option<String>,
    pub goal_id:   Option<String>,
    pub start:     Option<LatLon>,
    #[serde(alias = "goal")]
    pub end:       Option<LatLon>,
    /// Registry name; the configured default when absent.
    pub algorithm: Option<String>,
}

impl RouteRequest {
    pub fn between_ids(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self { start_id: Some(start.into()), goal_id: Some(goal.into()), ..Self::default() }
    }

    pub fn between_coords(start: LatLon, end: LatLon) -> Self {
        Self { start: Some(start), end: Some(end), ..Self::default() }
    }

    pub fn with_algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }
}

/// A found route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteResponse {
    pub algorithm:   String,
    /// Ids of the resolved endpoints.
    pub start_id:    String,
    pub goal_id:     String,
    /// `[lat, lon]` of every node on the path, start to goal.
    pub path:        Vec<[f64; 2]>,
    pub distance_m:  f64,
    pub duration_s:  f64,
    pub steps:       usize,
    pub elapsed_ms:  f64,
    pub iterations:  usize,
    pub expanded:    usize,
    pub start_point: LatLon,
    pub end_point:   LatLon,
}

/// A loaded graph node as listed to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub id:  String,
    pub lat: f64,
    pub lon: f64,
}
