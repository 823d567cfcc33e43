//! rr: command-line front end for the routing engine.
//!
//! ```text
//! rr import hanoi.osm              # ingest a map into graph.db
//! rr route --from-id 1 --to-id 9   # route between stored node ids
//! rr route --from 21.02,105.85 --to 21.03,105.80 -a dijkstra
//! rr algorithms | stats | check
//! ```
//!
//! Logging goes to stderr through `env_logger`; `RUST_LOG` wins over `-v`.

mod config;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use rr_ingest::load_raw_map;
use rr_query::{LatLon, QueryConfig, RouteRequest, RouteService, import_map};
use rr_store::SqliteStore;

use config::FileConfig;

#[derive(Debug, Parser)]
#[command(name = "rr", version, about = "Road routing over OpenStreetMap extracts")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite graph database (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ingest a map file (.json, .osm/.xml, .pbf) and replace the stored graph
    Import {
        map: PathBuf,
    },

    /// Find a route between two node ids or two coordinates
    Route {
        /// Start node id
        #[arg(long)]
        from_id: Option<String>,

        /// Goal node id
        #[arg(long)]
        to_id: Option<String>,

        /// Start coordinate as LAT,LON
        #[arg(long, value_parser = parse_lat_lon)]
        from: Option<LatLon>,

        /// Goal coordinate as LAT,LON
        #[arg(long, value_parser = parse_lat_lon)]
        to: Option<LatLon>,

        /// Algorithm name (see `rr algorithms`)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Override the snapping candidate count
        #[arg(long)]
        candidates: Option<usize>,
    },

    /// List registered algorithms
    Algorithms,

    /// Node and edge counts of the stored graph
    Stats,

    /// Connectivity report of the stored graph
    Check,
}

/// Parse `LAT,LON`.
fn parse_lat_lon(s: &str) -> Result<LatLon, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude {lat:?}: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude {lon:?}: {e}"))?;
    Ok(LatLon::new(lat, lon))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// One line with the whole context chain, printed once to stderr.
fn failure_message(e: &anyhow::Error) -> String {
    format!("error: {e:#}")
}

fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::load_or_default(cli.config.as_deref())?;
    let database = cli.database.clone().unwrap_or_else(|| file.database_or_default());
    let mut query = file.query;
    log::info!("database: {}", database.display());

    match cli.command {
        Command::Import { map } => import(&database, &map),
        Command::Route { from_id, to_id, from, to, algorithm, candidates } => {
            if let Some(k) = candidates {
                query.snap_candidates = k;
            }
            let req = RouteRequest { start_id: from_id, goal_id: to_id, start: from, end: to, algorithm };
            let svc = service(&database, query)?;
            let route = svc.find_route(&req).map_err(|e| anyhow::anyhow!("[{}] {e}", e.code()))?;
            println!("{}", serde_json::to_string_pretty(&route)?);
            Ok(())
        }
        Command::Algorithms => {
            for name in service(&database, query)?.list_algorithms() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Stats => {
            let stats = service(&database, query)?.graph_stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::Check => {
            let report = service(&database, query)?.check_graph()?;
            print_report(&report);
            Ok(())
        }
    }
}

fn open_store(database: &Path) -> Result<SqliteStore> {
    SqliteStore::open(database).with_context(|| format!("opening {}", database.display()))
}

fn service(database: &Path, query: QueryConfig) -> Result<RouteService> {
    if !database.exists() {
        bail!("database {} does not exist; run `rr import` first", database.display());
    }
    Ok(RouteService::new(Arc::new(open_store(database)?), query))
}

fn import(database: &Path, map: &Path) -> Result<()> {
    let raw = load_raw_map(map).with_context(|| format!("reading {}", map.display()))?;
    let store = open_store(database)?;
    let stats = import_map(&store, &raw)?;
    println!(
        "imported {}: {}/{} ways accepted, {} nodes, {} edges ({} degenerate segments dropped)",
        map.display(),
        stats.accepted_ways,
        stats.total_ways,
        stats.nodes,
        stats.edges,
        stats.dropped_segments,
    );
    if stats.missing_refs > 0 {
        println!("warning: {} way references point at missing points", stats.missing_refs);
    }
    Ok(())
}

fn print_report(r: &rr_query::GraphReport) {
    let s = &r.stats;
    let pct = |n: usize| if s.total_nodes == 0 { 0.0 } else { n as f64 * 100.0 / s.total_nodes as f64 };
    println!("nodes:            {}", s.total_nodes);
    println!("directed edges:   {}", s.directed_edges);
    println!("with out-edges:   {} ({:.2}%)", s.connected_nodes, pct(s.connected_nodes));
    println!("no edges at all:  {} ({:.2}%)", r.unlinked_nodes, pct(r.unlinked_nodes));
    println!("skipped edges:    {}", r.skipped_edges);
    println!("components:       {}", r.component_count());
    for (i, size) in r.component_sizes.iter().take(5).enumerate() {
        println!("  #{:<2} {size} nodes", i + 1);
    }
    println!("degree distribution (highest 10):");
    for (degree, count) in &r.degree_histogram {
        println!("  degree {degree:>3}: {count} nodes");
    }
}
