//! Road graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeIdx n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeIdx`.
//! Within one source node, edges keep the order in which they were added.
//!
//! # Identifiers
//!
//! Store records name nodes by string token.  The builder interns each
//! token to a dense `NodeIdx` once; searches never touch strings.  Use
//! [`RoadGraph::index_of`] and [`RoadGraph::key`] at the API boundary.
//!
//! # Adjacency semantics
//!
//! There is at most one edge per ordered `(from, to)` pair.  When the input
//! holds several, the one added last replaces the others.  Edges naming an
//! unknown node are skipped and counted in [`RoadGraph::skipped_edges`].

use rustc_hash::FxHashMap;

use rr_core::{Edge, EdgeIdx, GeoPoint, Node, NodeIdx, RoadClass};

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// Immutable once built.  Fields are `pub` for direct indexed access on
/// search hot paths.  Do not construct directly; use [`RoadGraphBuilder`].
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Source token of each node.  Indexed by `NodeIdx`.
    pub node_key: Vec<String>,

    /// Geographic position of each node.  Indexed by `NodeIdx`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeIdx) ────────────────────────────────────
    /// Source node of each edge; used to walk predecessor edges backwards.
    pub edge_from: Vec<NodeIdx>,

    pub edge_to: Vec<NodeIdx>,

    /// Great-circle length in kilometres.  The search weight.
    pub edge_distance_km: Vec<f64>,

    /// Traversal time in hours.
    pub edge_cost_h: Vec<f64>,

    pub edge_class: Vec<RoadClass>,

    /// Index into `way_ids`.
    pub edge_way: Vec<u32>,

    /// Interned way ids referenced by `edge_way`.
    pub way_ids: Vec<String>,

    key_index:     FxHashMap<String, NodeIdx>,
    skipped_edges: usize,
}

impl RoadGraph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    /// Build from store records in one pass.
    pub fn from_records(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut b = RoadGraphBuilder::with_capacity(nodes.len(), edges.len());
        for n in nodes {
            b.add_node(&n.id, n.pos);
        }
        for e in edges {
            b.add_edge(e);
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Edge records dropped at build time because an endpoint was unknown.
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    // ── Identifier boundary ───────────────────────────────────────────────

    /// Dense index of the node with source token `key`.
    pub fn index_of(&self, key: &str) -> Option<NodeIdx> {
        self.key_index.get(key).copied()
    }

    /// `true` if `node` is a valid index into this graph.
    #[inline]
    pub fn contains(&self, node: NodeIdx) -> bool {
        node.index() < self.node_count()
    }

    /// Source token of `node`.
    #[inline]
    pub fn key(&self, node: NodeIdx) -> &str {
        &self.node_key[node.index()]
    }

    #[inline]
    pub fn pos(&self, node: NodeIdx) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// Way id an edge was derived from.
    pub fn way_id(&self, edge: EdgeIdx) -> &str {
        &self.way_ids[self.edge_way[edge.index()] as usize]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeIdx`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range, no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeIdx) -> impl Iterator<Item = EdgeIdx> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeIdx(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeIdx) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The edge `from → to`, if any.
    pub fn edge_between(&self, from: NodeIdx, to: NodeIdx) -> Option<EdgeIdx> {
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes must be added before the edges that reference them.  `build()`
/// sorts edges by source node (stable) and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use rr_core::{GeoPoint, RoadClass};
/// use rr_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = b.add_node("a", GeoPoint::new(21.00, 105.80));
/// let c = b.add_node("c", GeoPoint::new(21.01, 105.80));
/// b.add_road(a, c, 1.112, RoadClass::Residential, "w1");
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// ```
pub struct RoadGraphBuilder {
    keys:       Vec<String>,
    positions:  Vec<GeoPoint>,
    key_index:  FxHashMap<String, NodeIdx>,
    raw_edges:  Vec<RawEdge>,
    pair_slot:  FxHashMap<(NodeIdx, NodeIdx), usize>,
    way_ids:    Vec<String>,
    way_index:  FxHashMap<String, u32>,
    skipped:    usize,
}

struct RawEdge {
    from:        NodeIdx,
    to:          NodeIdx,
    distance_km: f64,
    cost_h:      f64,
    class:       RoadClass,
    way:         u32,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            keys:      Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            key_index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges: Vec::with_capacity(edges),
            pair_slot: FxHashMap::with_capacity_and_hasher(edges, Default::default()),
            way_ids:   Vec::new(),
            way_index: FxHashMap::default(),
            skipped:   0,
        }
    }

    /// Add a node and return its index (sequential from 0).  Re-adding a
    /// known key keeps the first position and returns the existing index.
    pub fn add_node(&mut self, key: &str, pos: GeoPoint) -> NodeIdx {
        if let Some(&idx) = self.key_index.get(key) {
            log::warn!("graph: duplicate node {key:?}, keeping first position");
            return idx;
        }
        let idx = NodeIdx(self.keys.len() as u32);
        self.keys.push(key.to_owned());
        self.positions.push(pos);
        self.key_index.insert(key.to_owned(), idx);
        idx
    }

    /// Add a store edge record, keeping its stored cost.  Returns `false`
    /// (and counts the edge as skipped) when either endpoint is not a known
    /// node.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        let (Some(&from), Some(&to)) = (self.key_index.get(&edge.from), self.key_index.get(&edge.to))
        else {
            log::debug!("graph: skipping edge {} -> {} with unknown endpoint", edge.from, edge.to);
            self.skipped += 1;
            return false;
        };
        self.push_edge(from, to, edge.distance_km, edge.cost_h, edge.class, &edge.way_id);
        true
    }

    /// Add a **directed** edge.  Cost is derived from the class's speed.
    pub fn add_directed_edge(
        &mut self,
        from: NodeIdx,
        to: NodeIdx,
        distance_km: f64,
        class: RoadClass,
        way_id: &str,
    ) {
        self.push_edge(from, to, distance_km, class.cost_for(distance_km), class, way_id);
    }

    fn push_edge(
        &mut self,
        from: NodeIdx,
        to: NodeIdx,
        distance_km: f64,
        cost_h: f64,
        class: RoadClass,
        way_id: &str,
    ) {
        let way = self.intern_way(way_id);
        let raw = RawEdge { from, to, distance_km, cost_h, class, way };
        match self.pair_slot.get(&(from, to)) {
            Some(&slot) => self.raw_edges[slot] = raw,
            None => {
                self.pair_slot.insert((from, to), self.raw_edges.len());
                self.raw_edges.push(raw);
            }
        }
    }

    /// Convenience: add edges in **both directions**.
    pub fn add_road(&mut self, a: NodeIdx, b: NodeIdx, distance_km: f64, class: RoadClass, way_id: &str) {
        self.add_directed_edge(a, b, distance_km, class, way_id);
        self.add_directed_edge(b, a, distance_km, class, way_id);
    }

    pub fn node_count(&self) -> usize { self.keys.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn intern_way(&mut self, way_id: &str) -> u32 {
        if let Some(&i) = self.way_index.get(way_id) {
            return i;
        }
        let i = self.way_ids.len() as u32;
        self.way_ids.push(way_id.to_owned());
        self.way_index.insert(way_id.to_owned(), i);
        i
    }

    /// Consume the builder and produce a [`RoadGraph`].
    pub fn build(self) -> RoadGraph {
        let node_count = self.keys.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:        Vec<NodeIdx>   = raw.iter().map(|e| e.from).collect();
        let edge_to:          Vec<NodeIdx>   = raw.iter().map(|e| e.to).collect();
        let edge_distance_km: Vec<f64>       = raw.iter().map(|e| e.distance_km).collect();
        let edge_cost_h:      Vec<f64>       = raw.iter().map(|e| e.cost_h).collect();
        let edge_class:       Vec<RoadClass> = raw.iter().map(|e| e.class).collect();
        let edge_way:         Vec<u32>       = raw.iter().map(|e| e.way).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        if self.skipped > 0 {
            log::warn!("graph: skipped {} edges referencing unknown nodes", self.skipped);
        }

        RoadGraph {
            node_key: self.keys,
            node_pos: self.positions,
            node_out_start,
            edge_from,
            edge_to,
            edge_distance_km,
            edge_cost_h,
            edge_class,
            edge_way,
            way_ids: self.way_ids,
            key_index: self.key_index,
            skipped_edges: self.skipped,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
