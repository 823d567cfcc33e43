//! Name → engine table.
//!
//! The registry is an ordinary value: build it once at startup, register
//! engines, then hand it to the query layer.  Lookups take `&self`, so a
//! registry shared behind an `Arc` serves concurrent queries.

use std::sync::Arc;

use rr_core::NodeIdx;
use rr_graph::RoadGraph;

use crate::{AStar, Dijkstra, EngineResult, GreedyBestFirst, SearchEngine, SearchError, SearchResult};

/// Inputs to [`AlgorithmRegistry::run`].  Every field is required; they are
/// optional here so a missing one is reported as `InvalidInput` rather than
/// being unrepresentable at the call site.
#[derive(Clone, Copy, Default)]
pub struct SearchRequest<'a> {
    pub graph: Option<&'a RoadGraph>,
    pub start: Option<NodeIdx>,
    pub goal:  Option<NodeIdx>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(graph: &'a RoadGraph, start: NodeIdx, goal: NodeIdx) -> Self {
        Self { graph: Some(graph), start: Some(start), goal: Some(goal) }
    }
}

#[derive(Default)]
pub struct AlgorithmRegistry {
    engines: Vec<Arc<dyn SearchEngine>>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `astar`, `dijkstra` and `greedy_best_first`, in
    /// that order, each capped at `max_iterations` frontier pops.
    pub fn with_defaults(max_iterations: usize) -> Self {
        Self {
            engines: vec![
                Arc::new(AStar::with_max_iterations(max_iterations)) as Arc<dyn SearchEngine>,
                Arc::new(Dijkstra::with_max_iterations(max_iterations)) as Arc<dyn SearchEngine>,
                Arc::new(GreedyBestFirst::with_max_iterations(max_iterations)) as Arc<dyn SearchEngine>,
            ],
        }
    }

    /// Add `engine` under its own name.  A name already present is replaced
    /// in place and keeps its listing position.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidAlgorithm`] if the name is empty or contains
    /// whitespace.
    pub fn register(&mut self, engine: Arc<dyn SearchEngine>) -> EngineResult<()> {
        let name = engine.name();
        if name.is_empty() {
            return Err(SearchError::InvalidAlgorithm { name: name.to_owned(), reason: "empty name" });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(SearchError::InvalidAlgorithm {
                name:   name.to_owned(),
                reason: "name contains whitespace",
            });
        }

        match self.engines.iter().position(|e| e.name() == name) {
            Some(i) => {
                log::info!("registry: replaced algorithm {name}");
                self.engines[i] = engine;
            }
            None => {
                log::info!("registry: registered algorithm {name}");
                self.engines.push(engine);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SearchEngine>> {
        self.engines.iter().find(|e| e.name() == name).cloned()
    }

    /// Registered names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.name().to_owned()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.iter().any(|e| e.name() == name)
    }

    /// Run the engine registered as `name`.  `Ok(None)` means no path.
    ///
    /// # Errors
    ///
    /// [`SearchError::AlgorithmNotRegistered`] for an unknown name, then
    /// [`SearchError::InvalidInput`] for the first missing request field.
    pub fn run(&self, name: &str, req: SearchRequest<'_>) -> EngineResult<Option<SearchResult>> {
        let engine = self
            .get(name)
            .ok_or_else(|| SearchError::AlgorithmNotRegistered(name.to_owned()))?;
        let graph = req.graph.ok_or(SearchError::InvalidInput("graph"))?;
        let start = req.start.ok_or(SearchError::InvalidInput("start"))?;
        let goal = req.goal.ok_or(SearchError::InvalidInput("goal"))?;

        log::debug!("registry: running {name} from {} to {}", start, goal);
        Ok(engine.find_path(graph, start, goal))
    }
}
