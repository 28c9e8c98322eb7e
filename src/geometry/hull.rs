//! Convex hull over reachable points.

use geo::{ConvexHull, MultiPoint, Point};

use crate::error::{Error, Result};
use crate::models::{Polygon, Vertex};

/// Exterior ring of the convex hull of `points`.
///
/// Fills concavities, so an isochrone built from it over-approximates the
/// reachable area.
pub fn convex_hull(points: &[Vertex]) -> Result<Polygon> {
    if points.len() < 3 {
        return Err(Error::EmptyHull);
    }

    let multipoint: MultiPoint<f64> = points
        .iter()
        .map(|v| Point::new(v.lng, v.lat))
        .collect::<Vec<_>>()
        .into();
    let hull = multipoint.convex_hull();

    let ring: Vec<Vertex> = hull
        .exterior()
        .coords()
        .map(|c| Vertex::new(c.y, c.x))
        .collect();

    Polygon::new(ring).map_err(|_| Error::EmptyHull)
}
