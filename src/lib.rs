//! Catchment - place-density analysis inside polygons and travel-time reachability
//!
//! This library provides the geometry kernel, classifier and isochrone builders
//! shared by the analyze and reach binaries.

pub mod analyzer;
pub mod batch;
pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod google;
mod http;
pub mod isochrone;
pub mod mapbox;
pub mod models;
pub mod places;
pub mod ports;
pub mod retry;
pub mod wkt;

#[cfg(test)]
mod testing;

pub use analyzer::{AnalysisRecord, Analyzer, CategoryCounts};
pub use error::{Error, Result};
pub use models::{BoundingBox, CandidatePlace, Category, IsochroneResult, Polygon, Vertex};
