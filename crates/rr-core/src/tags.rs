//! Typed view of a way's tag dictionary.
//!
//! Only the tags that drive routing decisions get named fields; everything
//! else is kept verbatim in [`WayTags::extra`] for provenance.  With the
//! `serde` feature the struct (de)serialises as a flat string map, the same
//! shape it has in source data.

use std::collections::BTreeMap;

use crate::RoadClass;

/// Tag dictionary of a way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")
)]
pub struct WayTags {
    /// `highway=*`
    pub highway: Option<String>,
    /// `access=*`
    pub access: Option<String>,
    /// `oneway=*`
    pub oneway: Option<String>,
    /// `name=*`
    pub name: Option<String>,
    /// All other tags.
    pub extra: BTreeMap<String, String>,
}

impl WayTags {
    /// Build from `(key, value)` pairs.  Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tags = WayTags::default();
        for (k, v) in pairs {
            tags.insert(k.into(), v.into());
        }
        tags
    }

    /// Set one tag, routing the well-known keys to their fields.
    pub fn insert(&mut self, key: String, value: String) {
        match key.as_str() {
            "highway" => self.highway = Some(value),
            "access"  => self.access = Some(value),
            "oneway"  => self.oneway = Some(value),
            "name"    => self.name = Some(value),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Parsed classification, `None` when the way has no `highway` tag.
    pub fn road_class(&self) -> Option<RoadClass> {
        self.highway.as_deref().map(RoadClass::from_tag)
    }

    /// `access=no` or `access=private`.
    pub fn is_access_forbidden(&self) -> bool {
        matches!(self.access.as_deref(), Some("no" | "private"))
    }

    /// `oneway=yes|true|1`.
    pub fn is_oneway(&self) -> bool {
        matches!(self.oneway.as_deref(), Some("yes" | "true" | "1"))
    }

    /// Flatten back into a sorted string map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        let named = [
            ("highway", &self.highway),
            ("access", &self.access),
            ("oneway", &self.oneway),
            ("name", &self.name),
        ];
        for (k, v) in named {
            if let Some(v) = v {
                map.insert(k.to_owned(), v.clone());
            }
        }
        map
    }
}

impl From<BTreeMap<String, String>> for WayTags {
    fn from(map: BTreeMap<String, String>) -> Self {
        WayTags::from_pairs(map)
    }
}

impl From<WayTags> for BTreeMap<String, String> {
    fn from(tags: WayTags) -> Self {
        tags.to_map()
    }
}
