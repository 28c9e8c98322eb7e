//! Ray-casting point-in-polygon test.

use crate::models::Vertex;

/// Parity test: count crossings of a ray cast along the point's longitude.
///
/// Points exactly on a vertex or edge get whatever the parity toggle yields.
/// Fewer than 3 vertices is never inside.
pub fn point_in_polygon(point: Vertex, polygon: &[Vertex]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut p1 = polygon[0];

    for i in 1..=n {
        let p2 = polygon[i % n];

        if (p1.lng > point.lng) != (p2.lng > point.lng) {
            if p1.lng != p2.lng {
                let crossing_lat =
                    (point.lng - p1.lng) * (p2.lat - p1.lat) / (p2.lng - p1.lng) + p1.lat;
                if point.lat <= crossing_lat {
                    inside = !inside;
                }
            } else if point.lat <= p1.lat.max(p2.lat) {
                inside = !inside;
            }
        }

        p1 = p2;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Coord, LineString, Point, Polygon as GeoPolygon};

    fn ring(points: &[(f64, f64)]) -> Vec<Vertex> {
        points.iter().map(|&p| Vertex::from(p)).collect()
    }

    fn rotations(vertices: &[Vertex]) -> Vec<Vec<Vertex>> {
        (0..vertices.len())
            .map(|k| {
                let mut rotated = vertices.to_vec();
                rotated.rotate_left(k);
                rotated
            })
            .collect()
    }

    /// Concave "L" shape
    fn l_shape() -> Vec<Vertex> {
        ring(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (1.0, 3.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ])
    }

    #[test]
    fn test_unit_square() {
        let square = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(point_in_polygon(Vertex::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(Vertex::new(2.0, 2.0), &square));
        assert!(!point_in_polygon(Vertex::new(-0.5, 0.5), &square));
    }

    #[test]
    fn test_concave_notch_is_outside() {
        let l = l_shape();
        assert!(point_in_polygon(Vertex::new(0.5, 2.5), &l));
        assert!(point_in_polygon(Vertex::new(2.5, 0.5), &l));
        assert!(!point_in_polygon(Vertex::new(2.0, 2.0), &l));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!point_in_polygon(Vertex::new(0.5, 0.5), &line));
    }

    #[test]
    fn test_rotation_invariant() {
        let l = l_shape();
        let probes = [
            Vertex::new(0.5, 2.5),
            Vertex::new(2.0, 2.0),
            Vertex::new(2.5, 0.5),
            Vertex::new(-1.0, 0.5),
            Vertex::new(0.75, 0.25),
        ];
        for rotated in rotations(&l) {
            for probe in probes {
                assert_eq!(
                    point_in_polygon(probe, &rotated),
                    point_in_polygon(probe, &l),
                    "probe {:?}",
                    probe
                );
            }
        }
    }

    #[test]
    fn test_matches_reference_off_boundary() {
        let l = l_shape();
        let exterior: Vec<Coord<f64>> = l.iter().map(|v| Coord { x: v.lng, y: v.lat }).collect();
        let reference = GeoPolygon::new(LineString::new(exterior), vec![]);

        // offsets keep probes off every edge and vertex
        for i in 0..40 {
            for j in 0..40 {
                let lat = -0.4 + i as f64 * 0.0953 + 0.0017;
                let lng = -0.4 + j as f64 * 0.0953 + 0.0029;
                let expected = reference.contains(&Point::new(lng, lat));
                assert_eq!(
                    point_in_polygon(Vertex::new(lat, lng), &l),
                    expected,
                    "({}, {})",
                    lat,
                    lng
                );
            }
        }
    }
}
