//! Format-neutral raw map model.
//!
//! Readers in [`crate::json`], [`crate::osm_xml`] and [`crate::pbf`] all
//! produce a [`RawMap`]; the ingester never sees the wire format.

use serde::{Deserialize, Serialize};

use rr_core::WayTags;

/// A survey point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub id:  String,
    pub lat: f64,
    pub lon: f64,
}

/// A way: ordered point references plus tags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWay {
    pub id:   String,
    pub refs: Vec<String>,
    #[serde(default)]
    pub tags: WayTags,
}

/// Points and ways exactly as read from source, unfiltered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMap {
    pub points: Vec<RawPoint>,
    pub ways:   Vec<RawWay>,
}

impl RawMap {
    pub fn add_point(&mut self, id: impl Into<String>, lat: f64, lon: f64) -> &mut Self {
        self.points.push(RawPoint { id: id.into(), lat, lon });
        self
    }

    pub fn add_way<I, S>(&mut self, id: impl Into<String>, refs: I, tags: WayTags) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ways.push(RawWay {
            id: id.into(),
            refs: refs.into_iter().map(Into::into).collect(),
            tags,
        });
        self
    }
}
