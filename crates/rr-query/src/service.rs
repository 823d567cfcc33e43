//! `RouteService`: one value owning everything a query needs.
//!
//! # Lifecycle
//!
//! Build the service once with its store, registry and config, then share it
//! (`&RouteService` or `Arc<RouteService>`) across request handlers.  The
//! graph loads lazily on the first query that needs it and is replaced only
//! by [`RouteService::reload_graph`].
//!
//! # Endpoint resolution order
//!
//! 1. Coordinate given → validate, then snap ([`NodeSnapper`]).
//! 2. Otherwise id given → look it up in the loaded graph.
//! 3. Neither → `InvalidInput`.  Unknown id or nothing to snap to →
//!    `NodeNotFound`.
//!
//! Malformed endpoints are rejected before the graph is touched, so a bad
//! request never triggers a load.  Both endpoints resolve before the
//! algorithm name is checked.

use std::sync::Arc;

use rr_core::{GeoPoint, NodeIdx};
use rr_graph::{GraphLoader, GraphReport, GraphStats, RoadGraph};
use rr_ingest::{IngestStats, RawMap};
use rr_search::{AlgorithmRegistry, NodeSnapper, SearchRequest};
use rr_store::GraphStore;

use crate::{
    LatLon, NodeView, QueryConfig, QueryError, QueryResult, RouteRequest, RouteResponse,
    StoreLookup, import_map,
};

pub struct RouteService {
    store:    Arc<dyn GraphStore>,
    loader:   GraphLoader,
    registry: AlgorithmRegistry,
    snapper:  NodeSnapper,
    config:   QueryConfig,
}

impl RouteService {
    /// A service with the three built-in engines registered.
    pub fn new(store: Arc<dyn GraphStore>, config: QueryConfig) -> Self {
        let registry = AlgorithmRegistry::with_defaults(config.max_iterations);
        Self::with_registry(store, registry, config)
    }

    pub fn with_registry(store: Arc<dyn GraphStore>, registry: AlgorithmRegistry, config: QueryConfig) -> Self {
        if !registry.contains(&config.default_algorithm) {
            log::warn!(
                "default algorithm {:?} is not registered; requests must name one",
                config.default_algorithm,
            );
        }
        Self {
            store,
            loader: GraphLoader::new(),
            registry,
            snapper: NodeSnapper::new(config.snap_candidates),
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_loaded()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Resolve both endpoints and run the requested engine.
    pub fn find_route(&self, req: &RouteRequest) -> QueryResult<RouteResponse> {
        let start = Endpoint::parse("start", req.start, req.start_id.as_deref())?;
        let goal = Endpoint::parse("goal", req.end, req.goal_id.as_deref())?;

        let graph = self.graph()?;
        let start = self.resolve(&graph, "start", start)?;
        let goal = self.resolve(&graph, "goal", goal)?;

        let algorithm = req.algorithm.as_deref().unwrap_or(&self.config.default_algorithm);
        log::debug!("route: {} -> {} using {algorithm}", graph.key(start), graph.key(goal));

        let found = self
            .registry
            .run(algorithm, SearchRequest::new(&graph, start, goal))?
            .ok_or_else(|| QueryError::NoPathFound {
                start: graph.key(start).to_owned(),
                goal:  graph.key(goal).to_owned(),
            })?;

        log::info!(
            "route: {} nodes, {:.2} km via {algorithm} in {:?}",
            found.path.len(),
            found.distance_km,
            found.elapsed,
        );

        Ok(RouteResponse {
            algorithm:   algorithm.to_owned(),
            start_id:    graph.key(start).to_owned(),
            goal_id:     graph.key(goal).to_owned(),
            path:        found.path.iter().map(|&n| {
                let p = graph.pos(n);
                [p.lat, p.lon]
            }).collect(),
            distance_m:  found.distance_km * 1000.0,
            duration_s:  found.duration_s,
            steps:       found.steps,
            elapsed_ms:  found.elapsed.as_secs_f64() * 1e3,
            iterations:  found.iterations,
            expanded:    found.expanded,
            start_point: graph.pos(start).into(),
            end_point:   graph.pos(goal).into(),
        })
    }

    /// Registered algorithm names in registration order.
    pub fn list_algorithms(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Rebuild the in-memory graph from the store and swap it in.  On
    /// failure the previous graph stays in service.
    pub fn reload_graph(&self) -> QueryResult<GraphStats> {
        let graph = self.loader.load_all(self.store.as_ref())?;
        Ok(GraphStats::of(&graph))
    }

    /// Counts for the loaded graph, loading it first if needed.
    pub fn graph_stats(&self) -> QueryResult<GraphStats> {
        let graph = self.graph()?;
        Ok(GraphStats::of(&graph))
    }

    /// Connectivity diagnostics for the loaded graph.
    pub fn check_graph(&self) -> QueryResult<GraphReport> {
        let graph = self.graph()?;
        Ok(GraphReport::of(&graph))
    }

    /// Every loaded node, in load order.
    pub fn list_nodes(&self) -> QueryResult<Vec<NodeView>> {
        let graph = self.graph()?;
        Ok(graph
            .node_key
            .iter()
            .zip(&graph.node_pos)
            .map(|(id, p)| NodeView { id: id.clone(), lat: p.lat, lon: p.lon })
            .collect())
    }

    /// Import `raw` into the store, then reload.
    pub fn import(&self, raw: &RawMap) -> QueryResult<IngestStats> {
        let stats = import_map(self.store.as_ref(), raw)?;
        self.reload_graph()?;
        Ok(stats)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn graph(&self) -> QueryResult<Arc<RoadGraph>> {
        Ok(self.loader.get_or_load(self.store.as_ref())?)
    }

    fn resolve(&self, graph: &RoadGraph, which: &str, endpoint: Endpoint<'_>) -> QueryResult<NodeIdx> {
        match endpoint {
            Endpoint::Coord(pos) => self
                .snapper
                .best_endpoint_for(pos, graph, &StoreLookup(self.store.as_ref()))?
                .ok_or_else(|| QueryError::NodeNotFound(format!("no graph node near {which} {pos}"))),
            Endpoint::Id(id) => graph
                .index_of(id)
                .ok_or_else(|| QueryError::NodeNotFound(id.to_owned())),
        }
    }
}

/// One side of a route request, validated but not yet looked up.
enum Endpoint<'a> {
    Coord(GeoPoint),
    Id(&'a str),
}

impl<'a> Endpoint<'a> {
    fn parse(which: &str, coord: Option<LatLon>, id: Option<&'a str>) -> QueryResult<Self> {
        if let Some(c) = coord {
            return GeoPoint::checked(c.lat, c.lon)
                .map(Endpoint::Coord)
                .map_err(|e| QueryError::InvalidInput(format!("{which}: {e}")));
        }
        match id {
            Some(id) if !id.is_empty() => Ok(Endpoint::Id(id)),
            _ => Err(QueryError::InvalidInput(format!("{which} needs a node id or a coordinate"))),
        }
    }
}
