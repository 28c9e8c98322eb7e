//! Bounding boxes and the search radius derived from them.

use crate::models::{BoundingBox, Polygon, Vertex};

/// Rough meters per degree of latitude
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Largest radius the places-search provider accepts
pub const MAX_SEARCH_RADIUS_M: u32 = 50_000;

/// Min/max latitude and longitude across the polygon's vertices
pub fn bounding_box(polygon: &Polygon) -> BoundingBox {
    let vertices = polygon.vertices();
    let first = vertices[0];

    let (mut min_lat, mut max_lat) = (first.lat, first.lat);
    let (mut min_lng, mut max_lng) = (first.lng, first.lng);

    for v in &vertices[1..] {
        min_lat = min_lat.min(v.lat);
        max_lat = max_lat.max(v.lat);
        min_lng = min_lng.min(v.lng);
        max_lng = max_lng.max(v.lng);
    }

    BoundingBox {
        northeast: Vertex::new(max_lat, max_lng),
        southwest: Vertex::new(min_lat, min_lng),
    }
}

impl BoundingBox {
    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.northeast.lat + self.southwest.lat) / 2.0,
            (self.northeast.lng + self.southwest.lng) / 2.0,
        )
    }

    /// Search radius in meters covering the larger angular span.
    ///
    /// The longitude span is scaled by cos(center latitude); the result is capped
    /// at [`MAX_SEARCH_RADIUS_M`].
    pub fn search_radius_m(&self) -> u32 {
        let lat_span = self.northeast.lat - self.southwest.lat;
        let lng_span = self.northeast.lng - self.southwest.lng;
        let center_lat = self.center().lat.to_radians();

        let radius = (lat_span * METERS_PER_DEGREE)
            .max(lng_span * METERS_PER_DEGREE * center_lat.cos());

        (radius.max(0.0) as u32).min(MAX_SEARCH_RADIUS_M)
    }
}
