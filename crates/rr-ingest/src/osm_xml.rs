//! OSM XML extract reader.
//!
//! Streams the document with `quick-xml` and keeps only what the ingester
//! consumes: `<node id lat lon>` and `<way id>` with its `<nd ref>` and
//! `<tag k v>` children.  Node tags, relations and metadata attributes are
//! ignored.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use rr_core::{GeoPoint, WayTags};

use crate::{IngestError, IngestResult, RawMap, RawPoint, RawWay};

/// Parse an OSM XML document into a [`RawMap`].
///
/// # Errors
///
/// [`IngestError::Xml`] on malformed XML, a missing `<osm>` root, or a node
/// with unparsable coordinates.  An `<osm>` root without `<node>` or `<way>`
/// children reads as empty collections.
pub fn read_osm_xml<R: BufRead>(reader: R) -> IngestResult<RawMap> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut state = ParseState::default();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => state.open(&e, false)?,
            Event::Empty(e) => state.open(&e, true)?,
            Event::End(e) => {
                if e.name().as_ref() == b"way" {
                    state.close_way();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !state.saw_root {
        return Err(IngestError::Xml("missing <osm> root element".into()));
    }
    log::info!(
        "osm xml: read {} points, {} ways",
        state.map.points.len(),
        state.map.ways.len()
    );
    Ok(state.map)
}

// ── Internals ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ParseState {
    map:      RawMap,
    way:      Option<RawWay>,
    saw_root: bool,
}

impl ParseState {
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> IngestResult<()> {
        match e.name().as_ref() {
            b"osm" => self.saw_root = true,
            b"node" => {
                let id = required(e, b"id", "node")?;
                let lat = coordinate(e, b"lat", &id)?;
                let lon = coordinate(e, b"lon", &id)?;
                GeoPoint::checked(lat, lon)
                    .map_err(|source| IngestError::BadPoint { id: id.clone(), source })?;
                self.map.points.push(RawPoint { id, lat, lon });
            }
            b"way" => {
                let way = RawWay { id: required(e, b"id", "way")?, refs: Vec::new(), tags: WayTags::default() };
                if self_closing {
                    self.map.ways.push(way);
                } else {
                    self.way = Some(way);
                }
            }
            b"nd" => {
                if let Some(way) = self.way.as_mut() {
                    way.refs.push(required(e, b"ref", "nd")?);
                }
            }
            b"tag" => {
                if let Some(way) = self.way.as_mut() {
                    let k = required(e, b"k", "tag")?;
                    let v = required(e, b"v", "tag")?;
                    way.tags.insert(k, v);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close_way(&mut self) {
        if let Some(way) = self.way.take() {
            self.map.ways.push(way);
        }
    }
}

fn xml_err(e: impl std::fmt::Display) -> IngestError {
    IngestError::Xml(e.to_string())
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> IngestResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(xml_err)?.into_owned()));
        }
    }
    Ok(None)
}

fn required(e: &BytesStart<'_>, key: &[u8], element: &str) -> IngestResult<String> {
    attribute(e, key)?.ok_or_else(|| {
        IngestError::Xml(format!(
            "<{element}> without `{}` attribute",
            String::from_utf8_lossy(key)
        ))
    })
}

fn coordinate(e: &BytesStart<'_>, key: &[u8], id: &str) -> IngestResult<f64> {
    let raw = required(e, key, "node")?;
    raw.parse::<f64>().map_err(|_| {
        IngestError::Xml(format!(
            "node {id}: `{}` is not a number: {raw:?}",
            String::from_utf8_lossy(key)
        ))
    })
}
