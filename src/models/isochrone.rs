//! Isochrone results and the routing vocabularies of the travel-time providers.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{Polygon, Vertex};

/// Reachable area around a center for a given time budget.
///
/// Stateless: recomputed per request, never merged with earlier results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneResult {
    pub polygon: Polygon,
    pub center: Vertex,
    pub minutes: u32,
}

/// Routing profile of the polygon-isochrone provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    #[default]
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl RoutingProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingProfile::Driving => "driving",
            RoutingProfile::DrivingTraffic => "driving-traffic",
            RoutingProfile::Walking => "walking",
            RoutingProfile::Cycling => "cycling",
        }
    }
}

impl std::fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel mode of the point-to-point travel-time provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Drive,
    TwoWheeler,
    Walk,
    Bicycle,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "DRIVE",
            TravelMode::TwoWheeler => "TWO_WHEELER",
            TravelMode::Walk => "WALK",
            TravelMode::Bicycle => "BICYCLE",
        }
    }

    /// Traffic-aware routing is only accepted for motorised modes
    pub fn is_motorised(&self) -> bool {
        matches!(self, TravelMode::Drive | TravelMode::TwoWheeler)
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next 18:00 UTC at or after `now` (evening rush hour), for traffic-aware routing.
pub fn evening_departure(now: DateTime<Utc>) -> DateTime<Utc> {
    let six_pm = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
    let today = Utc.from_utc_datetime(&now.date_naive().and_time(six_pm));
    if now.hour() >= 18 {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Timestamp format accepted by both routing providers
pub fn format_departure(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
