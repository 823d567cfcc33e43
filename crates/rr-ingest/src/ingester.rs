//! The map ingester: raw points and ways in, graph records out.
//!
//! # Phases
//!
//! 1. Index every point by source id.  No filtering.
//! 2. Accept or skip each way.  A way is skipped when it has fewer than two
//!    point references, no `highway` tag, a classification outside the
//!    allow-list ([`RoadClass::is_traversable`]), or forbidden access.
//!    Every point referenced by an accepted way is marked used.
//! 3. Walk consecutive point pairs of each accepted way.  Segments shorter
//!    than [`MIN_SEGMENT_KM`] collapse duplicate points and are dropped;
//!    the rest become a forward edge plus, unless the way is one-way, a
//!    mirrored backward edge with identical distance and cost.
//! 4. Emit nodes only for used points, in first-reference order.
//!
//! The result is deterministic for identical input, with or without the
//! `parallel` feature.

use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rr_core::{Edge, GeoPoint, Node, RoadClass, Way};

use crate::{IngestError, IngestResult, RawMap, RawWay};

/// Segments shorter than this (1 m) are treated as duplicate points.
pub const MIN_SEGMENT_KM: f64 = 0.001;

// ── Output ────────────────────────────────────────────────────────────────────

/// Informational counters.  Not part of the correctness contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub total_ways:       usize,
    pub accepted_ways:    usize,
    pub skipped_ways:     usize,
    pub nodes:            usize,
    pub edges:            usize,
    /// Segments dropped for being shorter than [`MIN_SEGMENT_KM`].
    pub dropped_segments: usize,
    /// Distinct point ids referenced by accepted ways but absent from the
    /// point collection.
    pub missing_refs:     usize,
}

/// Everything one ingestion run produces.
#[derive(Clone, Debug, Default)]
pub struct IngestOutput {
    pub nodes: Vec<Node>,
    pub ways:  Vec<Way>,
    pub edges: Vec<Edge>,
    pub stats: IngestStats,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Run all four ingestion phases over `raw`.
///
/// # Errors
///
/// [`IngestError::BadPoint`] for a point with a non-finite or out-of-range
/// coordinate.  No partial output is returned.
///
/// Empty collections are valid and produce an empty graph.  Telling a
/// missing collection from an empty one is the readers' job.
pub fn ingest(raw: &RawMap) -> IngestResult<IngestOutput> {
    if raw.points.is_empty() || raw.ways.is_empty() {
        log::warn!(
            "ingest: raw map has {} points and {} ways; the graph will be empty",
            raw.points.len(),
            raw.ways.len()
        );
    }

    // ── Phase 1: index all points ─────────────────────────────────────────
    let mut points: FxHashMap<&str, GeoPoint> =
        FxHashMap::with_capacity_and_hasher(raw.points.len(), Default::default());
    for p in &raw.points {
        let pos = GeoPoint::checked(p.lat, p.lon).map_err(|source| IngestError::BadPoint {
            id: p.id.clone(),
            source,
        })?;
        points.insert(p.id.as_str(), pos);
    }

    // ── Phase 2: filter ways, mark used points ────────────────────────────
    let mut stats = IngestStats { total_ways: raw.ways.len(), ..IngestStats::default() };
    let mut accepted: Vec<(&RawWay, RoadClass)> = Vec::new();
    let mut used: FxHashSet<&str> = FxHashSet::default();
    let mut used_order: Vec<&str> = Vec::new();

    for way in &raw.ways {
        let Some(class) = accept(way) else {
            stats.skipped_ways += 1;
            continue;
        };
        for r in &way.refs {
            if used.insert(r.as_str()) {
                used_order.push(r.as_str());
            }
        }
        accepted.push((way, class));
    }
    stats.accepted_ways = accepted.len();

    // ── Phase 3: segments → directed edges ────────────────────────────────
    #[cfg(feature = "parallel")]
    let per_way: Vec<WayEdges> = accepted
        .par_iter()
        .map(|&(way, class)| way_edges(way, class, &points))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_way: Vec<WayEdges> = accepted
        .iter()
        .map(|&(way, class)| way_edges(way, class, &points))
        .collect();

    let mut edges = Vec::with_capacity(per_way.iter().map(|w| w.edges.len()).sum());
    for w in per_way {
        stats.dropped_segments += w.dropped;
        edges.extend(w.edges);
    }

    // ── Phase 4: nodes restricted to used points ──────────────────────────
    let mut nodes = Vec::with_capacity(used_order.len());
    for id in used_order {
        match points.get(id) {
            Some(&pos) => nodes.push(Node { id: id.to_owned(), pos }),
            None => stats.missing_refs += 1,
        }
    }

    let ways: Vec<Way> = accepted
        .iter()
        .map(|(w, _)| Way { id: w.id.clone(), nodes: w.refs.clone(), tags: w.tags.clone() })
        .collect();

    stats.nodes = nodes.len();
    stats.edges = edges.len();

    log::info!(
        "ingest: accepted {}/{} ways ({} skipped), {} nodes, {} edges, {} degenerate segments dropped",
        stats.accepted_ways,
        stats.total_ways,
        stats.skipped_ways,
        stats.nodes,
        stats.edges,
        stats.dropped_segments,
    );
    if stats.missing_refs > 0 {
        log::warn!("ingest: {} referenced points are missing from the point collection", stats.missing_refs);
    }

    Ok(IngestOutput { nodes, ways, edges, stats })
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Classification of `way` if it passes the filter, `None` if skipped.
fn accept(way: &RawWay) -> Option<RoadClass> {
    if way.refs.len() < 2 {
        return None;
    }
    let class = way.tags.road_class()?;
    if !class.is_traversable() || way.tags.is_access_forbidden() {
        return None;
    }
    Some(class)
}

struct WayEdges {
    edges:   Vec<Edge>,
    dropped: usize,
}

fn way_edges(way: &RawWay, class: RoadClass, points: &FxHashMap<&str, GeoPoint>) -> WayEdges {
    let oneway = way.tags.is_oneway();
    let mut out = WayEdges {
        edges:   Vec::with_capacity((way.refs.len() - 1) * if oneway { 1 } else { 2 }),
        dropped: 0,
    };

    for pair in way.refs.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (Some(&pa), Some(&pb)) = (points.get(a.as_str()), points.get(b.as_str())) else {
            continue;
        };

        let distance_km = pa.distance_km(pb);
        if distance_km < MIN_SEGMENT_KM {
            out.dropped += 1;
            continue;
        }

        let forward = Edge {
            from: a.clone(),
            to: b.clone(),
            distance_km,
            cost_h: class.cost_for(distance_km),
            class,
            way_id: way.id.clone(),
        };
        if !oneway {
            let backward = forward.reversed();
            out.edges.push(forward);
            out.edges.push(backward);
        } else {
            out.edges.push(forward);
        }
    }
    out
}
