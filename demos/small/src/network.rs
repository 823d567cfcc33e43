//! Synthetic street grid for the demo.
//!
//! A `SIZE × SIZE` block of residential streets around Hoàn Kiếm lake with
//! two primary avenues crossing it, one one-way street, a footpath that
//! ingestion filters out, and a private driveway that ingestion also drops.

use rr_core::WayTags;
use rr_ingest::RawMap;

pub const SIZE: usize = 12;

/// Grid spacing in degrees (about 220 m north-south).
const STEP: f64 = 0.002;
const ORIGIN: (f64, f64) = (21.020, 105.845);

pub fn point_id(row: usize, col: usize) -> String {
    format!("p{row}_{col}")
}

pub fn position(row: usize, col: usize) -> (f64, f64) {
    (ORIGIN.0 + row as f64 * STEP, ORIGIN.1 + col as f64 * STEP)
}

pub fn build_map() -> RawMap {
    let mut raw = RawMap::default();
    for r in 0..SIZE {
        for c in 0..SIZE {
            let (lat, lon) = position(r, c);
            raw.add_point(point_id(r, c), lat, lon);
        }
    }

    let residential = || WayTags::from_pairs([("highway", "residential")]);
    let primary = |name: &str| WayTags::from_pairs([("highway", "primary"), ("name", name)]);

    for r in 0..SIZE {
        let refs: Vec<String> = (0..SIZE).map(|c| point_id(r, c)).collect();
        let tags = match r {
            5 => primary("Tràng Tiền"),
            8 => WayTags::from_pairs([("highway", "tertiary"), ("oneway", "yes")]),
            _ => residential(),
        };
        raw.add_way(format!("row{r}"), refs, tags);
    }
    for c in 0..SIZE {
        let refs: Vec<String> = (0..SIZE).map(|r| point_id(r, c)).collect();
        let tags = if c == 6 { primary("Đinh Tiên Hoàng") } else { residential() };
        raw.add_way(format!("col{c}"), refs, tags);
    }

    // Shortcut across the lake shore, pedestrians only.
    raw.add_point("lake_a", 21.0265, 105.8520)
        .add_point("lake_b", 21.0275, 105.8530)
        .add_way("lakeside", ["lake_a", "lake_b", point_id(4, 4).as_str()], WayTags::from_pairs([("highway", "footway")]))
        .add_way(
            "driveway",
            [point_id(2, 2), point_id(3, 3)],
            WayTags::from_pairs([("highway", "service"), ("access", "private")]),
        );
    raw
}
