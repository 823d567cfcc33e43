//! SQLite backend (feature `sqlite`).
//!
//! One database file holds three tables:
//!
//! | Table   | Columns                                                     |
//! |---------|-------------------------------------------------------------|
//! | `nodes` | `id` (PK), `lat`, `lon`                                     |
//! | `ways`  | `id` (PK), `nodes` (JSON array), `tags` (JSON object)       |
//! | `edges` | `from_id`, `to_id`, `distance_km`, `cost_h`, `class`, `way_id` |
//!
//! Nearest-neighbour queries read a lat/lon bounding box through the
//! `nodes_lat_lon` index, widening it until it holds `k` nodes, then rank by
//! haversine distance.  A final box sized to the `k`-th distance catches
//! nodes that sat just outside the first box's corners.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use rr_core::geo::EARTH_RADIUS_KM;
use rr_core::{Edge, GeoPoint, Node, RoadClass, Way, WayTags};

use crate::store::sort_by_distance;
use crate::{GraphStore, StoreError, StoreResult};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS nodes (
        id  TEXT PRIMARY KEY,
        lat REAL NOT NULL,
        lon REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS nodes_lat_lon ON nodes (lat, lon);
    CREATE TABLE IF NOT EXISTS ways (
        id    TEXT PRIMARY KEY,
        nodes TEXT NOT NULL,
        tags  TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS edges (
        from_id     TEXT NOT NULL,
        to_id       TEXT NOT NULL,
        distance_km REAL NOT NULL,
        cost_h      REAL NOT NULL,
        class       TEXT NOT NULL,
        way_id      TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS edges_from ON edges (from_id);";

/// Half-size of the first nearest-neighbour box, in degrees of latitude
/// (about 550 m).
const INITIAL_HALF_DEG: f64 = 0.005;

/// Box growth factor between attempts.
const WIDEN: f64 = 4.0;

const KM_PER_DEG: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// A [`GraphStore`] persisted in an SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, mainly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

fn way_from_row(id: String, nodes: &str, tags: &str) -> StoreResult<Way> {
    let nodes: Vec<String> = serde_json::from_str(nodes).map_err(|e| StoreError::Corrupt {
        collection: "ways",
        id:         id.clone(),
        reason:     e.to_string(),
    })?;
    let tags: WayTags = serde_json::from_str(tags).map_err(|e| StoreError::Corrupt {
        collection: "ways",
        id:         id.clone(),
        reason:     e.to_string(),
    })?;
    Ok(Way { id, nodes, tags })
}

impl GraphStore for SqliteStore {
    fn replace_all(&self, nodes: &[Node], ways: &[Way], edges: &[Edge]) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute_batch(
            "DROP TABLE IF EXISTS nodes;
             DROP TABLE IF EXISTS ways;
             DROP TABLE IF EXISTS edges;",
        )?;
        tx.execute_batch(SCHEMA)?;

        {
            let mut stmt = tx.prepare_cached("INSERT INTO nodes (id, lat, lon) VALUES (?1, ?2, ?3)")?;
            for n in nodes {
                stmt.execute(params![n.id, n.pos.lat, n.pos.lon])?;
            }

            let mut stmt = tx.prepare_cached("INSERT INTO ways (id, nodes, tags) VALUES (?1, ?2, ?3)")?;
            for w in ways {
                stmt.execute(params![
                    w.id,
                    serde_json::to_string(&w.nodes)?,
                    serde_json::to_string(&w.tags)?,
                ])?;
            }

            let mut stmt = tx.prepare_cached(
                "INSERT INTO edges (from_id, to_id, distance_km, cost_h, class, way_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for e in edges {
                stmt.execute(params![
                    e.from,
                    e.to,
                    e.distance_km,
                    e.cost_h,
                    e.class.as_str(),
                    e.way_id,
                ])?;
            }
        }
        tx.commit()?;

        log::info!(
            "sqlite store: wrote {} nodes, {} ways, {} edges",
            nodes.len(),
            ways.len(),
            edges.len()
        );
        Ok(())
    }

    fn nodes(&self) -> StoreResult<Vec<Node>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, lat, lon FROM nodes ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Node { id: row.get(0)?, pos: GeoPoint::new(row.get(1)?, row.get(2)?) })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn edges(&self) -> StoreResult<Vec<Edge>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT from_id, to_id, distance_km, cost_h, class, way_id FROM edges ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            let class: String = row.get(4)?;
            Ok(Edge {
                from:        row.get(0)?,
                to:          row.get(1)?,
                distance_km: row.get(2)?,
                cost_h:      row.get(3)?,
                class:       RoadClass::from_tag(&class),
                way_id:      row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn ways(&self) -> StoreResult<Vec<Way>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, nodes, tags FROM ways ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;
        let mut ways = Vec::new();
        for row in rows {
            let (id, nodes, tags) = row?;
            ways.push(way_from_row(id, &nodes, &tags)?);
        }
        Ok(ways)
    }

    fn node(&self, id: &str) -> StoreResult<Option<Node>> {
        let conn = self.conn.lock();
        let node = conn
            .query_row("SELECT id, lat, lon FROM nodes WHERE id = ?1", params![id], |row| {
                Ok(Node { id: row.get(0)?, pos: GeoPoint::new(row.get(1)?, row.get(2)?) })
            })
            .optional()?;
        Ok(node)
    }

    fn way(&self, id: &str) -> StoreResult<Option<Way>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row("SELECT id, nodes, tags FROM ways WHERE id = ?1", params![id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })
            .optional()?;
        row.map(|(id, nodes, tags)| way_from_row(id, &nodes, &tags)).transpose()
    }

    fn nearest_nodes(&self, pos: GeoPoint, k: usize) -> StoreResult<Vec<Node>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let conn = self.conn.lock();
        let mut half_deg = INITIAL_HALF_DEG;
        loop {
            let mut found = nodes_in_box(&conn, pos, half_deg)?;
            let whole_world = half_deg >= 180.0;
            if found.len() >= k || whole_world {
                sort_by_distance(&mut found, pos);
                // Every node within `half_deg` of arc is inside the box, so
                // the ranking is exact once the k-th hit lies inside that cap.
                match found.get(k - 1).map(|n| pos.distance_km(n.pos) / KM_PER_DEG) {
                    Some(reach) if reach > half_deg && !whole_world => {
                        half_deg = (reach * 1.001).min(180.0);
                        continue;
                    }
                    _ => {
                        found.truncate(k);
                        return Ok(found);
                    }
                }
            }
            half_deg = (half_deg * WIDEN).min(180.0);
        }
    }
}

/// Every node inside the box spanning `half_deg` of latitude and the
/// matching longitude span around `pos`.
fn nodes_in_box(conn: &Connection, pos: GeoPoint, half_deg: f64) -> StoreResult<Vec<Node>> {
    // hav(d) >= cos(lat0) cos(lat) hav(dlon), bounded with the widest latitude.
    let widest_lat = (pos.lat.abs() + half_deg).min(90.0).to_radians();
    let s = (half_deg.to_radians() / 2.0).sin() / widest_lat.cos();
    let lon_half = if s < 1.0 { 2.0 * s.asin().to_degrees() } else { 180.0 };
    let (lon_lo, lon_hi) = if pos.lon - lon_half < -180.0 || pos.lon + lon_half > 180.0 {
        (-180.0, 180.0)
    } else {
        (pos.lon - lon_half, pos.lon + lon_half)
    };

    let mut stmt = conn.prepare_cached(
        "SELECT id, lat, lon FROM nodes \
         WHERE lat BETWEEN ?1 AND ?2 AND lon BETWEEN ?3 AND ?4",
    )?;
    let rows = stmt.query_map(
        params![pos.lat - half_deg, pos.lat + half_deg, lon_lo, lon_hi],
        |row| Ok(Node { id: row.get(0)?, pos: GeoPoint::new(row.get(1)?, row.get(2)?) }),
    )?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
