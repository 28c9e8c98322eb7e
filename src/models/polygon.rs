//! Vertex, polygon and bounding box types.
//!
//! All geometry is latitude-first (WGS84 degrees). Provider formats that are
//! longitude-first (WKT, GeoJSON) are converted at the module boundary.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic point (lat/lng)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lat: f64,
    pub lng: f64,
}

impl Vertex {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Bitwise identity, with -0.0 folded into 0.0
    fn key(&self) -> (u64, u64) {
        ((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }

    /// True when latitude is within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Implicitly closed vertex loop with at least 3 distinct vertices.
///
/// The closing vertex is never stored; it is re-added by the WKT serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    /// Normalize and validate a vertex loop.
    ///
    /// Drops consecutive duplicates and a trailing vertex equal to the first.
    /// Fails with [`Error::InsufficientVertices`] when fewer than 3 distinct
    /// vertices remain, so a ring bouncing between two points is rejected.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        let mut ring: Vec<Vertex> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if ring.last() != Some(&v) {
                ring.push(v);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let distinct = ring
            .iter()
            .map(Vertex::key)
            .collect::<HashSet<_>>()
            .len();
        if distinct < 3 {
            return Err(Error::InsufficientVertices { found: distinct });
        }

        Ok(Self { vertices: ring })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub northeast: Vertex,
    pub southwest: Vertex,
}
