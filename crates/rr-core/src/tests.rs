//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeIdx, NodeIdx};

    #[test]
    fn index_roundtrip() {
        let id = NodeIdx(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeIdx::from_index(42), Some(id));
        assert_eq!(NodeIdx::from_index(u32::MAX as usize), None);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeIdx::INVALID.0, u32::MAX);
        assert_eq!(EdgeIdx::default(), EdgeIdx::INVALID);
        assert!(!NodeIdx::default().is_valid());
        assert!(NodeIdx(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeIdx(7).to_string(), "n7");
        assert_eq!(EdgeIdx(3).to_string(), "e3");
        assert_eq!(NodeIdx::INVALID.to_string(), "n-");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(21.0122, 105.8499);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.19 km
        let a = GeoPoint::new(21.0, 105.0);
        let b = GeoPoint::new(22.0, 105.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn hundredth_degree_at_equator() {
        let d = GeoPoint::new(0.0, 0.0).distance_km(GeoPoint::new(0.0, 0.01));
        assert!((d - 1.112).abs() < 0.001, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(21.01, 105.85);
        let b = GeoPoint::new(21.02, 105.86);
        assert_eq!(a.distance_km(b), b.distance_km(a));
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(GeoPoint::checked(21.0, 105.0).is_ok());
        assert!(matches!(
            GeoPoint::checked(91.0, 0.0),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::checked(f64::NAN, 0.0).is_err());
    }
}

#[cfg(test)]
mod road {
    use crate::road::DEFAULT_SPEED_KMH;
    use crate::RoadClass;

    #[test]
    fn tag_roundtrip() {
        for tag in ["motorway", "residential", "living_street", "tertiary_link", "footway"] {
            assert_eq!(RoadClass::from_tag(tag).as_str(), tag);
        }
        assert_eq!(RoadClass::from_tag("bridleway"), RoadClass::Unknown);
    }

    #[test]
    fn speed_table() {
        assert_eq!(RoadClass::Motorway.speed_kmh(), 80.0);
        assert_eq!(RoadClass::Residential.speed_kmh(), 30.0);
        assert_eq!(RoadClass::LivingStreet.speed_kmh(), 10.0);
        assert_eq!(RoadClass::Unknown.speed_kmh(), DEFAULT_SPEED_KMH);
        assert_eq!(RoadClass::Footway.speed_kmh(), DEFAULT_SPEED_KMH);
    }

    #[test]
    fn cost_is_distance_over_speed() {
        let cost = RoadClass::Residential.cost_for(1.5);
        assert!((cost - 0.05).abs() < 1e-12);
    }

    #[test]
    fn allow_list_excludes_pedestrian() {
        assert!(RoadClass::Service.is_traversable());
        assert!(RoadClass::Road.is_traversable());
        assert!(!RoadClass::Footway.is_traversable());
        assert!(!RoadClass::Unknown.is_traversable());
    }

    #[test]
    fn snap_priorities() {
        assert_eq!(RoadClass::Trunk.snap_priority(), 5);
        assert_eq!(RoadClass::Primary.snap_priority(), 4);
        assert_eq!(RoadClass::Service.snap_priority(), 1);
        assert_eq!(RoadClass::Footway.snap_priority(), 0);
        assert_eq!(RoadClass::PrimaryLink.snap_priority(), 0);
    }
}

#[cfg(test)]
mod tags {
    use crate::{RoadClass, WayTags};

    #[test]
    fn named_fields_are_routed() {
        let tags = WayTags::from_pairs([
            ("highway", "primary"),
            ("name", "Phố Huế"),
            ("surface", "asphalt"),
        ]);
        assert_eq!(tags.road_class(), Some(RoadClass::Primary));
        assert_eq!(tags.name.as_deref(), Some("Phố Huế"));
        assert_eq!(tags.extra.get("surface").map(String::as_str), Some("asphalt"));
    }

    #[test]
    fn access_and_oneway() {
        assert!(WayTags::from_pairs([("access", "private")]).is_access_forbidden());
        assert!(WayTags::from_pairs([("access", "no")]).is_access_forbidden());
        assert!(!WayTags::from_pairs([("access", "yes")]).is_access_forbidden());
        assert!(WayTags::from_pairs([("oneway", "yes")]).is_oneway());
        assert!(WayTags::from_pairs([("oneway", "1")]).is_oneway());
        assert!(!WayTags::from_pairs([("oneway", "no")]).is_oneway());
        assert!(!WayTags::default().is_oneway());
    }

    #[test]
    fn to_map_restores_all_tags() {
        let tags = WayTags::from_pairs([("highway", "service"), ("lit", "yes")]);
        let map = tags.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["highway"], "service");
        assert_eq!(WayTags::from(map), tags);
    }
}

#[cfg(test)]
mod model {
    use crate::{Edge, RoadClass};

    #[test]
    fn reversed_edge_keeps_weights() {
        let e = Edge {
            from:        "a".into(),
            to:          "b".into(),
            distance_km: 0.4,
            cost_h:      RoadClass::Tertiary.cost_for(0.4),
            class:       RoadClass::Tertiary,
            way_id:      "w1".into(),
        };
        let r = e.reversed();
        assert_eq!((r.from.as_str(), r.to.as_str()), ("b", "a"));
        assert_eq!(r.distance_km, e.distance_km);
        assert_eq!(r.cost_h, e.cost_h);
        assert_eq!(r.way_id, e.way_id);
    }
}
