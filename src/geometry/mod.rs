//! Geometry kernel: bounding boxes, great-circle distance, point-in-polygon
//! membership and convex hulls over latitude-first vertices.

mod bounds;
mod distance;
mod hull;
mod pip;

pub use bounds::{bounding_box, MAX_SEARCH_RADIUS_M, METERS_PER_DEGREE};
pub use distance::{haversine_m, EARTH_RADIUS_M};
pub use hull::convex_hull;
pub use pip::point_in_polygon;
