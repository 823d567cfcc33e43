//! Unit tests for the rr binary.

#[cfg(test)]
mod args {
    use clap::{CommandFactory, Parser};

    use crate::{Cli, Command, parse_lat_lon};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lat_lon_parsing() {
        let p = parse_lat_lon("21.0285, 105.8542").unwrap();
        assert_eq!((p.lat, p.lon), (21.0285, 105.8542));
        assert!(parse_lat_lon("21.0").is_err());
        assert!(parse_lat_lon("north,105").is_err());
    }

    #[test]
    fn failure_is_one_line_with_context() {
        let err = anyhow::anyhow!("no such file").context("reading city.osm");
        let msg = crate::failure_message(&err);
        assert_eq!(msg, "error: reading city.osm: no such file");
        assert_eq!(msg.matches("no such file").count(), 1);
    }

    #[test]
    fn route_flags() {
        let cli = Cli::parse_from([
            "rr", "-vv", "--database", "x.db", "route", "--from", "21,105.8", "--to-id", "42", "-a", "dijkstra",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.database.as_deref(), Some(std::path::Path::new("x.db")));
        let Command::Route { from, to_id, algorithm, from_id, .. } = cli.command else {
            panic!("expected route");
        };
        assert_eq!(from.map(|p| p.lat), Some(21.0));
        assert_eq!(to_id.as_deref(), Some("42"));
        assert_eq!(from_id, None);
        assert_eq!(algorithm.as_deref(), Some("dijkstra"));
    }
}

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use crate::config::{DEFAULT_DATABASE, FileConfig};

    #[test]
    fn full_file() {
        let cfg = FileConfig::parse(
            r#"
            database = "hanoi.db"

            [query]
            default_algorithm = "dijkstra"
            snap_candidates   = 5
            max_iterations    = 1000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database, Some(PathBuf::from("hanoi.db")));
        assert_eq!(cfg.query.default_algorithm, "dijkstra");
        assert_eq!(cfg.query.snap_candidates, 5);
        assert_eq!(cfg.query.max_iterations, 1000);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = FileConfig::parse("").unwrap();
        assert_eq!(cfg, FileConfig::default());
        assert_eq!(cfg.database_or_default(), PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(cfg.query.default_algorithm, "astar");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(FileConfig::parse("databse = \"typo.db\"").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rr.toml");
        std::fs::write(&path, "[query]\nsnap_candidates = 3\n").unwrap();
        let cfg = FileConfig::load(&path).unwrap();
        assert_eq!(cfg.query.snap_candidates, 3);
        assert!(FileConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}

#[cfg(test)]
mod end_to_end {
    use std::io::Write;

    use crate::{import, service};
    use rr_query::{QueryConfig, RouteRequest};

    const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <node id="1" lat="21.0000" lon="105.8000"/>
  <node id="2" lat="21.0000" lon="105.8100"/>
  <node id="3" lat="21.0100" lon="105.8100"/>
  <way id="10">
    <nd ref="1"/><nd ref="2"/><nd ref="3"/>
    <tag k="highway" v="secondary"/>
  </way>
</osm>
"#;

    #[test]
    fn import_then_route() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("tiny.osm");
        std::fs::File::create(&map).unwrap().write_all(MAP.as_bytes()).unwrap();
        let db = dir.path().join("graph.db");

        assert!(service(&db, QueryConfig::default()).is_err(), "missing database must be reported");

        import(&db, &map).unwrap();
        let svc = service(&db, QueryConfig::default()).unwrap();
        let r = svc.find_route(&RouteRequest::between_ids("3", "1")).unwrap();
        assert_eq!(r.steps, 2);
        assert_eq!(svc.graph_stats().unwrap().total_nodes, 3);
    }
}
