//! Core data models for polygon analysis and isochrones.

pub mod isochrone;
pub mod place;
pub mod polygon;

pub use isochrone::{IsochroneResult, RoutingProfile, TravelMode};
pub use place::{CandidatePlace, Category};
pub use polygon::{BoundingBox, Polygon, Vertex};
