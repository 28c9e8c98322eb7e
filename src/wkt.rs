//! WKT polygon parsing and serialization.
//!
//! WKT coordinates are `longitude latitude`; everything downstream is
//! latitude-first, so both directions swap axes.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::Result;
use crate::models::{Polygon, Vertex};

static DOUBLE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)POLYGON\s*\(\((.*?)\)\)").expect("static regex"));
static SINGLE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)POLYGON\s*\((.*?)\)").expect("static regex"));
static ANY_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\((.*?)\)").expect("static regex"));

/// Vertices recovered from a WKT string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWkt {
    /// Latitude-first vertices, closing duplicate removed
    pub vertices: Vec<Vertex>,
    /// Coordinate pairs dropped because they were not two numbers
    pub skipped: usize,
}

impl ParsedWkt {
    /// Validate into an analyzable polygon (at least 3 distinct vertices).
    pub fn into_polygon(self) -> Result<Polygon> {
        Polygon::new(self.vertices)
    }
}

/// Parse a WKT polygon.
///
/// Accepts `POLYGON((...))`, `POLYGON (...)`, quoted strings, and bare
/// coordinate lists. Malformed pairs are skipped and counted rather than failing
/// the parse; whether the result is analyzable is for the caller to check.
pub fn parse(wkt: &str) -> ParsedWkt {
    let text = wkt.trim().trim_matches('"').trim_matches('\'');

    let coords = if text.to_uppercase().contains("POLYGON") {
        DOUBLE_PAREN
            .captures(text)
            .or_else(|| SINGLE_PAREN.captures(text))
            .or_else(|| ANY_PAREN.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(text)
    } else {
        text.trim_matches(|c| c == '(' || c == ')')
    };

    let mut vertices = Vec::new();
    let mut skipped = 0;

    for pair in coords.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        match parse_pair(pair) {
            Some(v) => vertices.push(v),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed WKT coordinate pairs", skipped);
    }

    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    ParsedWkt { vertices, skipped }
}

fn parse_pair(pair: &str) -> Option<Vertex> {
    let mut parts = pair.split_whitespace();
    let lng: f64 = parts.next()?.parse().ok()?;
    let lat: f64 = parts.next()?.parse().ok()?;
    if !lng.is_finite() || !lat.is_finite() {
        return None;
    }
    Some(Vertex::new(lat, lng))
}

/// Serialize a polygon as `POLYGON((lng lat, ...))` with the ring closed.
pub fn serialize(polygon: &Polygon) -> String {
    let vertices = polygon.vertices();
    let coords: Vec<String> = vertices
        .iter()
        .chain(vertices.first())
        .map(|v| format!("{} {}", v.lng, v.lat))
        .collect();
    format!("POLYGON(({}))", coords.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_unit_square() {
        let parsed = parse("POLYGON((0 0, 0 1, 1 1, 1 0, 0 0))");
        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.vertices,
            vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(1.0, 0.0),
                Vertex::new(1.0, 1.0),
                Vertex::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_axis_swap() {
        let parsed = parse("POLYGON ((77.209 28.6139, 77.21 28.6149, 77.209 28.6159))");
        assert_eq!(parsed.vertices[0], Vertex::new(28.6139, 77.209));
    }

    #[test]
    fn test_quoted_lowercase_and_extra_whitespace() {
        let parsed = parse("\"polygon ((  0   0 ,0 1,  1 1 ))\"");
        assert_eq!(parsed.vertices.len(), 3);
        assert_eq!(parsed.vertices[2], Vertex::new(1.0, 1.0));
    }

    #[test]
    fn test_single_paren_form() {
        let parsed = parse("POLYGON (0 0, 0 2, 2 2, 2 0)");
        assert_eq!(parsed.vertices.len(), 4);
    }

    #[test]
    fn test_bare_coordinate_list() {
        let parsed = parse("(10 20, 11 20, 11 21)");
        assert_eq!(parsed.vertices[0], Vertex::new(20.0, 10.0));
        assert_eq!(parsed.vertices.len(), 3);
    }

    #[test]
    fn test_malformed_pairs_counted() {
        let parsed = parse("POLYGON((0 0, abc 1, 0 1, 5, 1 1, 1 0))");
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.vertices.len(), 4);
    }

    #[test]
    fn test_two_vertices_not_analyzable() {
        let parsed = parse("POLYGON((0 0, 1 1, 0 0))");
        assert_eq!(parsed.vertices.len(), 2);
        assert!(parsed.into_polygon().is_err());
    }

    #[test]
    fn test_alternating_ring_not_analyzable() {
        let parsed = parse("POLYGON((0 0, 1 1, 0 0, 1 1, 0 0))");
        assert_eq!(parsed.vertices.len(), 4);
        assert!(matches!(
            parsed.into_polygon(),
            Err(Error::InsufficientVertices { found: 2 })
        ));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let wkt = "POLYGON((77.5 12.9, 77.6 12.9, 77.6 13.0, 77.5 13.0, 77.5 12.9))";
        assert_eq!(parse(wkt), parse(wkt));
    }

    #[test]
    fn test_round_trip() {
        let wkt = "POLYGON((77.5946 12.9716, 77.6046 12.9716, 77.6046 12.9816, 77.5946 12.9716))";
        let polygon = parse(wkt).into_polygon().unwrap();
        let serialized = serialize(&polygon);
        assert_eq!(serialized, wkt);

        let again = parse(&serialized).into_polygon().unwrap();
        assert_eq!(again, polygon);
    }

    #[test]
    fn test_serialize_closes_ring() {
        let polygon = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(serialize(&polygon), "POLYGON((0 0, 0 1, 1 1, 0 0))");
    }
}
