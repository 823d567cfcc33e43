//! Road classification, cost model, and snapping priority.
//!
//! A way's `highway` tag is parsed once into a [`RoadClass`].  Two fixed
//! tables hang off it:
//!
//! | Table                          | Used by                               |
//! |--------------------------------|---------------------------------------|
//! | [`RoadClass::speed_kmh`]       | edge time cost at ingestion           |
//! | [`RoadClass::snap_priority`]   | endpoint snapping at query time       |
//!
//! Only the classes in [`RoadClass::is_traversable`] survive ingestion; the
//! pedestrian classes exist so that snapping can rank edges written by
//! other producers of the same store.

use std::fmt;

/// Average speed assumed for classes without an entry in the speed table.
pub const DEFAULT_SPEED_KMH: f64 = 20.0;

/// OSM `highway=*` classification of a road segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    PrimaryLink,
    SecondaryLink,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Road,
    Pedestrian,
    Footway,
    Path,
    Steps,
    Track,
    /// Any value not listed above.
    Unknown,
}

impl RoadClass {
    /// Parse a `highway` tag value.  Never fails: unlisted values map to
    /// [`RoadClass::Unknown`].
    pub fn from_tag(value: &str) -> Self {
        match value {
            "motorway"       => RoadClass::Motorway,
            "trunk"          => RoadClass::Trunk,
            "primary"        => RoadClass::Primary,
            "secondary"      => RoadClass::Secondary,
            "tertiary"       => RoadClass::Tertiary,
            "primary_link"   => RoadClass::PrimaryLink,
            "secondary_link" => RoadClass::SecondaryLink,
            "tertiary_link"  => RoadClass::TertiaryLink,
            "unclassified"   => RoadClass::Unclassified,
            "residential"    => RoadClass::Residential,
            "living_street"  => RoadClass::LivingStreet,
            "service"        => RoadClass::Service,
            "road"           => RoadClass::Road,
            "pedestrian"     => RoadClass::Pedestrian,
            "footway"        => RoadClass::Footway,
            "path"           => RoadClass::Path,
            "steps"          => RoadClass::Steps,
            "track"          => RoadClass::Track,
            _                => RoadClass::Unknown,
        }
    }

    /// Tag value as written in source data and in the store.
    pub fn as_str(self) -> &'static str {
        match self {
            RoadClass::Motorway      => "motorway",
            RoadClass::Trunk         => "trunk",
            RoadClass::Primary       => "primary",
            RoadClass::Secondary     => "secondary",
            RoadClass::Tertiary      => "tertiary",
            RoadClass::PrimaryLink   => "primary_link",
            RoadClass::SecondaryLink => "secondary_link",
            RoadClass::TertiaryLink  => "tertiary_link",
            RoadClass::Unclassified  => "unclassified",
            RoadClass::Residential   => "residential",
            RoadClass::LivingStreet  => "living_street",
            RoadClass::Service       => "service",
            RoadClass::Road          => "road",
            RoadClass::Pedestrian    => "pedestrian",
            RoadClass::Footway       => "footway",
            RoadClass::Path          => "path",
            RoadClass::Steps         => "steps",
            RoadClass::Track         => "track",
            RoadClass::Unknown       => "unknown",
        }
    }

    /// `true` for classes accepted by the ingester's allow-list.
    pub fn is_traversable(self) -> bool {
        matches!(
            self,
            RoadClass::Motorway
                | RoadClass::Trunk
                | RoadClass::Primary
                | RoadClass::Secondary
                | RoadClass::Tertiary
                | RoadClass::PrimaryLink
                | RoadClass::SecondaryLink
                | RoadClass::TertiaryLink
                | RoadClass::Unclassified
                | RoadClass::Residential
                | RoadClass::LivingStreet
                | RoadClass::Service
                | RoadClass::Road
        )
    }

    /// Average traversal speed in km/h.  Total: classes without an entry
    /// fall back to [`DEFAULT_SPEED_KMH`].
    pub fn speed_kmh(self) -> f64 {
        match self {
            RoadClass::Motorway                              => 80.0,
            RoadClass::Trunk                                 => 70.0,
            RoadClass::Primary   | RoadClass::PrimaryLink    => 60.0,
            RoadClass::Secondary | RoadClass::SecondaryLink  => 50.0,
            RoadClass::Tertiary  | RoadClass::TertiaryLink   => 40.0,
            RoadClass::Unclassified
            | RoadClass::Residential
            | RoadClass::Road                                => 30.0,
            RoadClass::Service                               => 20.0,
            RoadClass::LivingStreet                          => 10.0,
            _                                                => DEFAULT_SPEED_KMH,
        }
    }

    /// Time cost in hours of traversing `distance_km` of this class.
    #[inline]
    pub fn cost_for(self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh()
    }

    /// Endpoint snapping score: major roads highest, pedestrian-only 0.
    pub fn snap_priority(self) -> u8 {
        match self {
            RoadClass::Motorway | RoadClass::Trunk => 5,
            RoadClass::Primary                     => 4,
            RoadClass::Secondary                   => 3,
            RoadClass::Tertiary                    => 2,
            RoadClass::Residential
            | RoadClass::Unclassified
            | RoadClass::LivingStreet
            | RoadClass::Service
            | RoadClass::Road                      => 1,
            _                                      => 0,
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
