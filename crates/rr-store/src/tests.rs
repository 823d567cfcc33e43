//! Unit tests for rr-store.
//!
//! Every behaviour is checked against both backends through the trait.

#[cfg(test)]
mod helpers {
    use rr_core::{Edge, Node, RoadClass, Way, WayTags};

    /// Three nodes on a short east-west street and one far to the north.
    pub fn records() -> (Vec<Node>, Vec<Way>, Vec<Edge>) {
        let nodes = vec![
            Node::new("n1", 21.0000, 105.8000),
            Node::new("n2", 21.0000, 105.8010),
            Node::new("n3", 21.0000, 105.8020),
            Node::new("far", 21.5000, 105.8000),
        ];
        let ways = vec![Way {
            id:    "w1".into(),
            nodes: vec!["n1".into(), "n2".into(), "n3".into()],
            tags:  WayTags::from_pairs([("highway", "primary"), ("name", "Lê Duẩn"), ("lanes", "4")]),
        }];
        let d = nodes[0].pos.distance_km(nodes[1].pos);
        let fwd = Edge {
            from:        "n1".into(),
            to:          "n2".into(),
            distance_km: d,
            cost_h:      RoadClass::Primary.cost_for(d),
            class:       RoadClass::Primary,
            way_id:      "w1".into(),
        };
        let edges = vec![fwd.clone(), fwd.reversed()];
        (nodes, ways, edges)
    }
}

#[cfg(test)]
mod contract {
    use rr_core::{GeoPoint, Node, RoadClass};

    use super::helpers::records;
    use crate::{GraphStore, MemoryStore, StoreError};

    pub fn roundtrip(store: &dyn GraphStore) {
        let (nodes, ways, edges) = records();
        store.replace_all(&nodes, &ways, &edges).unwrap();

        assert_eq!(store.nodes().unwrap(), nodes);
        assert_eq!(store.ways().unwrap(), ways);
        let loaded = store.edges().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].class, RoadClass::Primary);
        assert_eq!(loaded[0].distance_km, edges[0].distance_km);
        assert_eq!(loaded[1].from, "n2");
    }

    pub fn lookup_by_id(store: &dyn GraphStore) {
        let (nodes, ways, edges) = records();
        store.replace_all(&nodes, &ways, &edges).unwrap();

        assert_eq!(store.node("n2").unwrap(), Some(nodes[1].clone()));
        assert_eq!(store.node("missing").unwrap(), None);
        let way = store.way("w1").unwrap().unwrap();
        assert_eq!(way.tags.name.as_deref(), Some("Lê Duẩn"));
        assert_eq!(way.tags.extra.get("lanes").map(String::as_str), Some("4"));
    }

    pub fn nearest_first(store: &dyn GraphStore) {
        let (nodes, ways, edges) = records();
        store.replace_all(&nodes, &ways, &edges).unwrap();

        let near = store.nearest_nodes(GeoPoint::new(21.0001, 105.8011), 3).unwrap();
        let ids: Vec<&str> = near.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n2", "n3", "n1"]);

        let all = store.nearest_nodes(GeoPoint::new(21.0, 105.8), 10).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().unwrap().id, "far");
    }

    pub fn nearest_at_high_latitude(store: &dyn GraphStore) {
        // At 70° N a degree of longitude is about a third of a degree of
        // latitude on the ground, so `east` is closer than every `north*`.
        let q = GeoPoint::new(70.0, 20.0);
        let mut nodes: Vec<Node> = (0..5)
            .map(|i| Node::new(format!("north{i}"), 70.005, 20.0 + i as f64 * 1e-5))
            .collect();
        nodes.push(Node::new("east", 70.0, 20.006));
        store.replace_all(&nodes, &[], &[]).unwrap();

        let near = store.nearest_nodes(q, 1).unwrap();
        assert_eq!(near[0].id, "east");
        let three = store.nearest_nodes(q, 3).unwrap();
        assert_eq!(three[0].id, "east");
        assert!(three[1..].iter().all(|n| n.id.starts_with("north")));
    }

    pub fn nearest_beyond_first_box(store: &dyn GraphStore) {
        // `diag` sits near the corner of a small box around the query;
        // `side` is nearer but further out along one axis.
        let nodes = vec![
            Node::new("diag", 0.0049, 0.0049),
            Node::new("side", 0.0, 0.0055),
            Node::new("away", 3.0, 3.0),
        ];
        store.replace_all(&nodes, &[], &[]).unwrap();

        let q = GeoPoint::new(0.0, 0.0);
        let ids: Vec<String> = store.nearest_nodes(q, 2).unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["side", "diag"]);
        assert_eq!(store.nearest_nodes(q, 1).unwrap()[0].id, "side");
        assert_eq!(store.nearest_nodes(q, 5).unwrap().len(), 3);
        assert!(store.nearest_nodes(q, 0).unwrap().is_empty());
    }

    pub fn replace_drops_previous_graph(store: &dyn GraphStore) {
        let (nodes, ways, edges) = records();
        store.replace_all(&nodes, &ways, &edges).unwrap();
        store.replace_all(&[Node::new("solo", 0.0, 0.0)], &[], &[]).unwrap();

        assert_eq!(store.nodes().unwrap().len(), 1);
        assert!(store.edges().unwrap().is_empty());
        assert!(store.ways().unwrap().is_empty());
        assert_eq!(store.node("n1").unwrap(), None);
    }

    pub fn failed_replace_keeps_previous_graph(store: &dyn GraphStore) {
        let (nodes, ways, edges) = records();
        store.replace_all(&nodes, &ways, &edges).unwrap();

        let dup = vec![Node::new("x", 0.0, 0.0), Node::new("x", 1.0, 1.0)];
        assert!(store.replace_all(&dup, &[], &[]).is_err());
        assert_eq!(store.nodes().unwrap(), nodes);
        assert_eq!(store.edges().unwrap().len(), 2);
    }

    pub fn empty_store_reads_empty(store: &dyn GraphStore) {
        assert!(store.nodes().unwrap().is_empty());
        assert!(store.edges().unwrap().is_empty());
        assert!(store.nearest_nodes(GeoPoint::new(0.0, 0.0), 5).unwrap().is_empty());
    }

    #[test]
    fn memory_roundtrip() {
        roundtrip(&MemoryStore::new());
    }

    #[test]
    fn memory_lookup_by_id() {
        lookup_by_id(&MemoryStore::new());
    }

    #[test]
    fn memory_nearest_first() {
        nearest_first(&MemoryStore::new());
    }

    #[test]
    fn memory_nearest_at_high_latitude() {
        nearest_at_high_latitude(&MemoryStore::new());
    }

    #[test]
    fn memory_nearest_beyond_first_box() {
        nearest_beyond_first_box(&MemoryStore::new());
    }

    #[test]
    fn memory_replace_drops_previous_graph() {
        replace_drops_previous_graph(&MemoryStore::new());
    }

    #[test]
    fn memory_failed_replace_keeps_previous_graph() {
        failed_replace_keeps_previous_graph(&MemoryStore::new());
    }

    #[test]
    fn memory_empty_store() {
        empty_store_reads_empty(&MemoryStore::new());
    }

    #[test]
    fn memory_duplicate_way_id() {
        let (nodes, ways, edges) = records();
        let doubled = vec![ways[0].clone(), ways[0].clone()];
        let err = MemoryStore::new().replace_all(&nodes, &doubled, &edges).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { collection: "ways", .. }));
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite {
    use super::contract;
    use super::helpers::records;
    use crate::{GraphStore, SqliteStore};

    #[test]
    fn roundtrip() {
        contract::roundtrip(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn lookup_by_id() {
        contract::lookup_by_id(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn nearest_first() {
        contract::nearest_first(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn nearest_at_high_latitude() {
        contract::nearest_at_high_latitude(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn nearest_beyond_first_box() {
        contract::nearest_beyond_first_box(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn replace_drops_previous_graph() {
        contract::replace_drops_previous_graph(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn failed_replace_keeps_previous_graph() {
        contract::failed_replace_keeps_previous_graph(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn empty_store() {
        contract::empty_store_reads_empty(&SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.db");
        let (nodes, ways, edges) = records();
        {
            let store = SqliteStore::open(&path).unwrap();
            store.replace_all(&nodes, &ways, &edges).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.nodes().unwrap(), nodes);
        assert_eq!(store.edges().unwrap().len(), edges.len());
    }
}
