//! Geographic coordinate type and great-circle distance.
//!
//! Unlike a city-scale simulation, edge lengths here feed a 1 m
//! near-duplicate threshold and an admissible A* heuristic, so coordinates
//! are kept in `f64`.

use crate::{CoreError, CoreResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting NaN/infinite or out-of-range components.
    pub fn checked(lat: f64, lon: f64) -> CoreResult<Self> {
        let p = Self { lat, lon };
        if p.is_valid() {
            Ok(p)
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let hav_lat = ((phi2 - phi1) / 2.0).sin().powi(2);
        let hav_lon = ((other.lon - self.lon).to_radians() / 2.0).sin().powi(2);
        let h = (hav_lat + phi1.cos() * phi2.cos() * hav_lon).min(1.0);
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }

    /// `true` when both components are finite and inside the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
