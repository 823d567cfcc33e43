//! Unit tests for rr-graph.

#[cfg(test)]
mod helpers {
    use rr_core::{Edge, Node, RoadClass};

    pub fn edge(from: &str, to: &str, km: f64, class: RoadClass, way: &str) -> Edge {
        Edge {
            from:        from.into(),
            to:          to.into(),
            distance_km: km,
            cost_h:      class.cost_for(km),
            class,
            way_id:      way.into(),
        }
    }

    /// a ⇄ b → c, plus an unconnected node z.
    pub fn small() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::new("a", 0.0, 0.00),
            Node::new("b", 0.0, 0.01),
            Node::new("c", 0.0, 0.02),
            Node::new("z", 1.0, 1.00),
        ];
        let ab = edge("a", "b", 1.11, RoadClass::Primary, "w1");
        let edges = vec![ab.clone(), ab.reversed(), edge("b", "c", 1.11, RoadClass::Residential, "w2")];
        (nodes, edges)
    }
}

#[cfg(test)]
mod graph {
    use rr_core::{GeoPoint, NodeIdx, RoadClass};

    use super::helpers::{edge, small};
    use crate::{RoadGraph, RoadGraphBuilder};

    #[test]
    fn csr_layout() {
        let (nodes, edges) = small();
        let g = RoadGraph::from_records(&nodes, &edges);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_out_start.len(), 5);

        let b = g.index_of("b").unwrap();
        let targets: Vec<&str> = g.out_edges(b).map(|e| g.key(g.edge_to[e.index()])).collect();
        assert_eq!(targets, vec!["a", "c"]);
        assert_eq!(g.out_degree(g.index_of("z").unwrap()), 0);
    }

    #[test]
    fn interning_round_trips() {
        let (nodes, edges) = small();
        let g = RoadGraph::from_records(&nodes, &edges);
        for n in &nodes {
            let idx = g.index_of(&n.id).unwrap();
            assert_eq!(g.key(idx), n.id);
            assert_eq!(g.pos(idx), n.pos);
        }
        assert_eq!(g.index_of("nope"), None);
        assert!(!g.contains(NodeIdx(4)));
        assert!(!g.contains(NodeIdx::INVALID));
    }

    #[test]
    fn edge_attributes_follow_records() {
        let (nodes, edges) = small();
        let g = RoadGraph::from_records(&nodes, &edges);
        let b = g.index_of("b").unwrap();
        let c = g.index_of("c").unwrap();
        let e = g.edge_between(b, c).unwrap();
        assert_eq!(g.edge_class[e.index()], RoadClass::Residential);
        assert_eq!(g.edge_distance_km[e.index()], 1.11);
        assert_eq!(g.edge_from[e.index()], b);
        assert_eq!(g.way_id(e), "w2");
        assert!(g.edge_between(c, b).is_none());
    }

    #[test]
    fn stored_cost_is_kept() {
        let (nodes, mut edges) = small();
        // A cost from an older speed table must survive loading unchanged.
        edges[2].cost_h = 0.5;
        let g = RoadGraph::from_records(&nodes, &edges);
        let e = g.edge_between(g.index_of("b").unwrap(), g.index_of("c").unwrap()).unwrap();
        assert_eq!(g.edge_cost_h[e.index()], 0.5);
        assert_ne!(RoadClass::Residential.cost_for(1.11), 0.5);
    }

    #[test]
    fn duplicate_pair_keeps_last_record() {
        let (nodes, mut edges) = small();
        edges.push(edge("a", "b", 5.0, RoadClass::Service, "w9"));
        let g = RoadGraph::from_records(&nodes, &edges);
        assert_eq!(g.edge_count(), 3);

        let a = g.index_of("a").unwrap();
        let b = g.index_of("b").unwrap();
        let e = g.edge_between(a, b).unwrap();
        assert_eq!(g.edge_distance_km[e.index()], 5.0);
        assert_eq!(g.edge_class[e.index()], RoadClass::Service);
        assert_eq!(g.way_id(e), "w9");
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let (nodes, mut edges) = small();
        edges.push(edge("a", "ghost", 1.0, RoadClass::Primary, "w3"));
        edges.push(edge("ghost", "c", 1.0, RoadClass::Primary, "w3"));
        let g = RoadGraph::from_records(&nodes, &edges);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.skipped_edges(), 2);
    }

    #[test]
    fn builder_road_adds_both_directions() {
        let mut b = RoadGraphBuilder::new();
        let x = b.add_node("x", GeoPoint::new(0.0, 0.0));
        let y = b.add_node("y", GeoPoint::new(0.0, 0.01));
        assert_eq!(b.add_node("x", GeoPoint::new(9.0, 9.0)), x);
        b.add_road(x, y, 1.11, RoadClass::Motorway, "m");
        let g = b.build();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.pos(x), GeoPoint::new(0.0, 0.0));
        let e = g.edge_between(y, x).unwrap();
        assert!((g.edge_cost_h[e.index()] - 1.11 / 80.0).abs() < 1e-12);
    }

    #[test]
    fn empty_graph() {
        let g = RoadGraph::empty();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node_out_start, vec![0]);
    }
}

#[cfg(test)]
mod loader {
    use std::sync::Arc;

    use rr_core::Node;
    use rr_store::{GraphStore, MemoryStore};

    use super::helpers::small;
    use crate::{GraphError, GraphLoader};

    fn seeded() -> MemoryStore {
        let (nodes, edges) = small();
        let store = MemoryStore::new();
        store.replace_all(&nodes, &[], &edges).unwrap();
        store
    }

    #[test]
    fn not_loaded_until_first_load() {
        let loader = GraphLoader::new();
        assert!(!loader.is_loaded());
        assert!(loader.snapshot().is_none());
        assert!(matches!(loader.require(), Err(GraphError::NotLoaded)));

        loader.load_all(&seeded()).unwrap();
        assert!(loader.is_loaded());
        assert_eq!(loader.require().unwrap().node_count(), 4);
    }

    #[test]
    fn reload_swaps_snapshot_and_keeps_old_alive() {
        let store = seeded();
        let loader = GraphLoader::new();
        let old = loader.load_all(&store).unwrap();

        store.replace_all(&[Node::new("solo", 0.0, 0.0)], &[], &[]).unwrap();
        let new = loader.load_all(&store).unwrap();

        assert_eq!(old.node_count(), 4);
        assert_eq!(new.node_count(), 1);
        assert!(Arc::ptr_eq(&new, &loader.snapshot().unwrap()));
    }

    #[test]
    fn repeated_loads_are_equivalent() {
        let store = seeded();
        let loader = GraphLoader::new();
        let first = loader.load_all(&store).unwrap();
        let second = loader.load_all(&store).unwrap();
        assert_eq!(first.node_key, second.node_key);
        assert_eq!(first.edge_to, second.edge_to);
        assert_eq!(first.node_out_start, second.node_out_start);
    }

    #[test]
    fn get_or_load_loads_once() {
        let store = seeded();
        let loader = GraphLoader::new();
        let a = loader.get_or_load(&store).unwrap();
        let b = loader.get_or_load(&store).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn readers_on_other_threads_see_whole_snapshots() {
        let store = Arc::new(seeded());
        let loader = Arc::new(GraphLoader::new());
        loader.load_all(store.as_ref()).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let loader = Arc::clone(&loader);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let g = loader.snapshot().unwrap();
                        assert_eq!(g.node_out_start.len(), g.node_count() + 1);
                        assert_eq!(*g.node_out_start.last().unwrap() as usize, g.edge_count());
                    }
                })
            })
            .collect();
        for _ in 0..20 {
            loader.load_all(store.as_ref()).unwrap();
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}

#[cfg(test)]
mod stats {
    use rr_core::RoadClass;

    use super::helpers::{edge, small};
    use crate::{GraphReport, GraphStats, RoadGraph};

    #[test]
    fn stats_counts() {
        let (nodes, edges) = small();
        let g = RoadGraph::from_records(&nodes, &edges);
        let s = GraphStats::of(&g);
        assert_eq!(s.total_nodes, 4);
        // a and b have outgoing edges; c is a one-way sink, z is unconnected.
        assert_eq!(s.connected_nodes, 2);
        assert_eq!(s.isolated_nodes, 2);
        assert_eq!(s.directed_edges, 3);
        assert_eq!(s.total_edges, 1.5);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let (nodes, edges) = small();
        let s = GraphStats::of(&RoadGraph::from_records(&nodes, &edges));
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["totalNodes"], 4);
        assert_eq!(json["connectedNodes"], 2);
        assert_eq!(json["totalEdges"], 1.5);
    }

    #[test]
    fn report_components_largest_first() {
        let (mut nodes, mut edges) = small();
        nodes.push(rr_core::Node::new("p", 5.0, 5.0));
        nodes.push(rr_core::Node::new("q", 5.0, 5.01));
        edges.push(edge("p", "q", 1.1, RoadClass::Service, "w5"));

        let g = RoadGraph::from_records(&nodes, &edges);
        let r = GraphReport::of(&g);
        assert_eq!(r.component_sizes, vec![3, 2]);
        assert_eq!(r.component_count(), 2);
        assert_eq!(r.largest_component(), 3);
        assert_eq!(r.unlinked_nodes, 1);
        assert_eq!(r.skipped_edges, 0);
    }

    #[test]
    fn report_keys_do_not_collide() {
        let (nodes, edges) = small();
        let r = GraphReport::of(&RoadGraph::from_records(&nodes, &edges));
        let json = serde_json::to_value(&r).unwrap();
        // c has an incoming edge, so only z lacks edges entirely.
        assert_eq!(json["stats"]["isolatedNodes"], 2);
        assert_eq!(json["unlinkedNodes"], 1);
        assert!(json.get("isolatedNodes").is_none());
    }

    #[test]
    fn report_degree_histogram_highest_first() {
        let (nodes, edges) = small();
        let r = GraphReport::of(&RoadGraph::from_records(&nodes, &edges));
        // b: a→b, b→a, b→c = 3; a: 2; c: 1; z: 0.
        assert_eq!(r.degree_histogram, vec![(3, 1), (2, 1), (1, 1), (0, 1)]);
    }

    #[test]
    fn report_of_empty_graph() {
        let r = GraphReport::of(&RoadGraph::empty());
        assert!(r.component_sizes.is_empty());
        assert_eq!(r.largest_component(), 0);
        assert_eq!(r.stats.total_edges, 0.0);
    }
}
