//! Provider interfaces.
//!
//! The core never holds a global client: each builder or adapter is handed an
//! implementation of one of these traits. HTTP adapters live in [`crate::google`]
//! and [`crate::mapbox`]; tests substitute deterministic fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CandidatePlace, RoutingProfile, TravelMode, Vertex};

/// One page of a nearby search
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub center: Vertex,
    /// At most [`crate::geometry::MAX_SEARCH_RADIUS_M`]
    pub radius_m: u32,
    pub place_type: Option<String>,
    pub keyword: Option<String>,
    /// Continuation token from the previous page
    pub page_token: Option<String>,
}

/// Free-text search around a center
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub query: String,
    pub center: Vertex,
    pub radius_m: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacesPage {
    pub places: Vec<CandidatePlace>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    async fn nearby(&self, request: &NearbyRequest) -> Result<PlacesPage>;

    async fn text_search(&self, request: &TextRequest) -> Result<PlacesPage>;
}

/// Why a travel-time call failed, as classified by a diagnostic probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Authorization,
    Network,
    Quota,
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Authorization => write!(f, "authorization"),
            FailureKind::Network => write!(f, "network"),
            FailureKind::Quota => write!(f, "quota"),
            FailureKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[async_trait]
pub trait TravelTimeProvider: Send + Sync {
    /// Travel time in seconds from `origin` to `destination`
    async fn travel_time(&self, origin: Vertex, destination: Vertex, mode: TravelMode)
        -> Result<f64>;

    /// Issue one bare request and classify its failure, if any.
    async fn diagnose(&self, origin: Vertex, destination: Vertex) -> Option<ProviderFailure>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneRequest {
    pub center: Vertex,
    pub minutes: u32,
    pub profile: RoutingProfile,
    /// ISO 8601 departure timestamp for traffic-aware profiles
    pub depart_at: Option<String>,
    /// 0.0 keeps the highest fidelity
    pub denoise: f64,
    /// 0 disables simplification
    pub generalize_meters: f64,
}

#[async_trait]
pub trait IsochroneProvider: Send + Sync {
    async fn isochrone(&self, request: &IsochroneRequest) -> Result<geojson::FeatureCollection>;
}
