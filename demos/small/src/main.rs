//! small: end-to-end walk through the routing engine on a synthetic grid.
//!
//! Ingests the grid from [`network`] into an in-memory store, then runs every
//! registered algorithm between opposite corners, snaps two raw coordinates,
//! and prints the graph check.  `RUST_LOG=debug` shows per-search statistics.

mod network;

use std::sync::Arc;

use anyhow::Result;

use rr_query::{LatLon, QueryConfig, RouteRequest, RouteService};
use rr_store::MemoryStore;

use network::{SIZE, build_map, point_id, position};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let svc = RouteService::new(Arc::new(MemoryStore::new()), QueryConfig::default());
    let stats = svc.import(&build_map())?;
    println!(
        "ingested {}/{} ways -> {} nodes, {} directed edges",
        stats.accepted_ways, stats.total_ways, stats.nodes, stats.edges
    );

    // ── Corner to corner with every engine ────────────────────────────────
    let from = point_id(0, 0);
    let to = point_id(SIZE - 1, SIZE - 1);
    println!("\n{from} -> {to}");
    println!("{:<18} {:>10} {:>10} {:>6} {:>9}", "algorithm", "metres", "seconds", "steps", "expanded");
    for name in svc.list_algorithms() {
        let r = svc.find_route(&RouteRequest::between_ids(&from, &to).with_algorithm(&name))?;
        println!(
            "{:<18} {:>10.1} {:>10.1} {:>6} {:>9}",
            name, r.distance_m, r.duration_s, r.steps, r.expanded
        );
    }

    // ── The one-way row refuses westbound traffic on itself ───────────────
    let east = svc.find_route(&RouteRequest::between_ids(point_id(8, 0), point_id(8, SIZE - 1)))?;
    let west = svc.find_route(&RouteRequest::between_ids(point_id(8, SIZE - 1), point_id(8, 0)))?;
    println!("\none-way row 8: eastbound {} steps, westbound detour {} steps", east.steps, west.steps);

    // ── Snapping raw coordinates ──────────────────────────────────────────
    let (a_lat, a_lon) = position(1, 1);
    let (b_lat, b_lon) = position(SIZE - 2, 3);
    let req = RouteRequest::between_coords(
        LatLon::new(a_lat + 0.0003, a_lon + 0.0002),
        LatLon::new(b_lat - 0.0002, b_lon + 0.0004),
    );
    let r = svc.find_route(&req)?;
    println!("\nsnapped ({a_lat:.4}, {a_lon:.4})~ -> {}, ({b_lat:.4}, {b_lon:.4})~ -> {}", r.start_id, r.goal_id);
    println!("route {:.0} m over {} steps", r.distance_m, r.steps);

    // ── Filtered data is really gone ──────────────────────────────────────
    match svc.find_route(&RouteRequest::between_ids("lake_a", point_id(0, 0))) {
        Ok(_) => println!("\nunexpected: footway point is routable"),
        Err(e) => println!("\nfootway point: {} ({})", e, e.code()),
    }

    // ── Graph check ───────────────────────────────────────────────────────
    let report = svc.check_graph()?;
    println!(
        "\n{} nodes, {} components (largest {}), {} without edges",
        report.stats.total_nodes,
        report.component_count(),
        report.largest_component(),
        report.unlinked_nodes
    );
    Ok(())
}
