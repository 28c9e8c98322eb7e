use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::ROUTES_URL;
use crate::error::{Error, Result};
use crate::http;
use crate::models::isochrone::{evening_departure, format_departure};
use crate::models::{TravelMode, Vertex};
use crate::ports::{FailureKind, ProviderFailure, TravelTimeProvider};

const PROVIDER: &str = "google routes";

const FIELD_MASK: &str = "routes.duration,routes.distanceMeters,routes.legs.duration,routes.legs.distanceMeters";
const PROBE_FIELD_MASK: &str = "routes.duration";

/// Longest provider body quoted in a probe message
const PROBE_BODY_LIMIT: usize = 200;

/// Point-to-point travel times from `computeRoutes`
pub struct GoogleRoutes {
    client: Client,
    api_key: String,
    url: String,
    probe_timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    traffic_model: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_time: Option<String>,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl From<Vertex> for Waypoint {
    fn from(v: Vertex) -> Self {
        Waypoint {
            location: Location {
                lat_lng: LatLng {
                    latitude: v.lat,
                    longitude: v.lng,
                },
            },
        }
    }
}

impl RouteRequest {
    fn new(origin: Vertex, destination: Vertex, mode: TravelMode) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: mode,
            routing_preference: None,
            traffic_model: None,
            departure_time: None,
        }
    }

    /// Evening rush-hour traffic, motorised modes only
    fn traffic_aware(mut self) -> Self {
        if self.travel_mode.is_motorised() {
            self.routing_preference = Some("TRAFFIC_AWARE");
            self.traffic_model = Some("BEST_GUESS");
            self.departure_time = Some(format_departure(evening_departure(Utc::now())));
        }
        self
    }
}

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<Route>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Route {
    duration: Option<Value>,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<Value>,
    message: Option<String>,
    status: Option<String>,
}

impl GoogleRoutes {
    pub fn new(api_key: impl Into<String>, timeout: Duration, probe_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http::client(timeout)?,
            api_key: api_key.into(),
            url: ROUTES_URL.to_string(),
            probe_timeout,
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn post(&self, field_mask: &'static str, body: &RouteRequest) -> RequestBuilder {
        self.client
            .post(&self.url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask)
            .json(body)
    }
}

#[async_trait]
impl TravelTimeProvider for GoogleRoutes {
    async fn travel_time(&self, origin: Vertex, destination: Vertex, mode: TravelMode) -> Result<f64> {
        let body = RouteRequest::new(origin, destination, mode).traffic_aware();
        let response = self.post(FIELD_MASK, &body).send().await?;
        let parsed: RoutesResponse = http::read_json(PROVIDER, response).await?;

        if let Some(error) = parsed.error {
            return Err(Error::Provider {
                provider: PROVIDER,
                status: error.status.unwrap_or_else(|| "ERROR".to_string()),
                message: error.message.unwrap_or_default(),
            });
        }

        let route = parsed
            .routes
            .first()
            .ok_or_else(|| Error::invalid(PROVIDER, format!("no {} route returned", mode)))?;

        route_duration(route).ok_or_else(|| Error::invalid(PROVIDER, "route has no duration"))
    }

    async fn diagnose(&self, origin: Vertex, destination: Vertex) -> Option<ProviderFailure> {
        let body = RouteRequest::new(origin, destination, TravelMode::Drive);
        let response = self
            .post(PROBE_FIELD_MASK, &body)
            .timeout(self.probe_timeout)
            .send()
            .await;

        match response {
            Err(e) => Some(ProviderFailure {
                kind: FailureKind::Network,
                message: format!("Network error: {}", e),
            }),
            Ok(r) if r.status().is_success() => None,
            Ok(r) => {
                let status = r.status().as_u16();
                let text = r.text().await.unwrap_or_default();
                Some(classify_failure(status, &text))
            }
        }
    }
}

/// Top-level duration, or the sum of the leg durations when it is missing
fn route_duration(route: &Route) -> Option<f64> {
    if let Some(secs) = route.duration.as_ref().and_then(parse_duration_seconds) {
        return Some(secs);
    }

    let total: f64 = route
        .legs
        .iter()
        .filter_map(|leg| leg.duration.as_ref().and_then(parse_duration_seconds))
        .sum();
    (total > 0.0).then_some(total)
}

/// Parse a duration in any of the encodings the Routes API produces:
/// a number, `"123"`, `"123s"`, or an object with `seconds` or `value`.
pub fn parse_duration_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            s.strip_suffix('s').unwrap_or(s).trim().parse().ok()
        }
        Value::Object(map) => map
            .get("seconds")
            .or_else(|| map.get("value"))
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }),
        _ => None,
    }
}

/// Classify a non-2xx probe response
pub fn classify_failure(status: u16, body: &str) -> ProviderFailure {
    let error = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let api_status = error.as_ref().and_then(|e| e.status.as_deref());

    let kind = match (status, api_status) {
        (401 | 403, _) | (_, Some("PERMISSION_DENIED" | "UNAUTHENTICATED")) => FailureKind::Authorization,
        (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => FailureKind::Quota,
        _ => FailureKind::Other,
    };

    let message = match &error {
        Some(e) => {
            let code = match &e.code {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                _ => "?".to_string(),
            };
            format!("API Error ({}): {}", code, e.message.as_deref().unwrap_or("Unknown"))
        }
        None => format!(
            "HTTP {}: {}",
            status,
            body.chars().take(PROBE_BODY_LIMIT).collect::<String>()
        ),
    };

    ProviderFailure { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duration_encodings() {
        assert_eq!(parse_duration_seconds(&json!(420)), Some(420.0));
        assert_eq!(parse_duration_seconds(&json!(12.5)), Some(12.5));
        assert_eq!(parse_duration_seconds(&json!("300")), Some(300.0));
        assert_eq!(parse_duration_seconds(&json!("300s")), Some(300.0));
        assert_eq!(parse_duration_seconds(&json!(" 42s ")), Some(42.0));
        assert_eq!(parse_duration_seconds(&json!({"seconds": "61"})), Some(61.0));
        assert_eq!(parse_duration_seconds(&json!({"value": 90})), Some(90.0));
    }

    #[test]
    fn test_unparseable_durations() {
        assert_eq!(parse_duration_seconds(&json!("soon")), None);
        assert_eq!(parse_duration_seconds(&json!(null)), None);
        assert_eq!(parse_duration_seconds(&json!([1, 2])), None);
        assert_eq!(parse_duration_seconds(&json!({"minutes": 3})), None);
    }

    #[test]
    fn test_legs_summed_when_duration_missing() {
        let route: Route = serde_json::from_value(json!({
            "legs": [{"duration": "100s"}, {"duration": "bogus"}, {"duration": "50s"}]
        }))
        .unwrap();
        assert_eq!(route_duration(&route), Some(150.0));
    }

    #[test]
    fn test_zero_leg_total_is_missing() {
        let route: Route = serde_json::from_value(json!({"legs": [{"duration": "0s"}]})).unwrap();
        assert_eq!(route_duration(&route), None);

        let route: Route = serde_json::from_value(json!({})).unwrap();
        assert_eq!(route_duration(&route), None);
    }

    #[test]
    fn test_request_body_traffic_fields() {
        let origin = Vertex::new(12.97, 77.59);
        let dest = Vertex::new(12.98, 77.6);

        let drive = serde_json::to_value(RouteRequest::new(origin, dest, TravelMode::Drive).traffic_aware()).unwrap();
        assert_eq!(drive["travelMode"], "DRIVE");
        assert_eq!(drive["routingPreference"], "TRAFFIC_AWARE");
        assert_eq!(drive["trafficModel"], "BEST_GUESS");
        assert_eq!(drive["origin"]["location"]["latLng"]["latitude"], 12.97);

        let walk = serde_json::to_value(RouteRequest::new(origin, dest, TravelMode::Walk).traffic_aware()).unwrap();
        assert_eq!(walk["travelMode"], "WALK");
        assert!(walk.get("routingPreference").is_none());
        assert!(walk.get("departureTime").is_none());
    }

    #[test]
    fn test_failure_classification() {
        let denied = classify_failure(
            403,
            r#"{"error": {"code": 403, "message": "Routes API has not been used", "status": "PERMISSION_DENIED"}}"#,
        );
        assert_eq!(denied.kind, FailureKind::Authorization);
        assert_eq!(denied.message, "API Error (403): Routes API has not been used");

        let quota = classify_failure(
            400,
            r#"{"error": {"code": 400, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        assert_eq!(quota.kind, FailureKind::Quota);

        let throttled = classify_failure(429, "Too Many Requests");
        assert_eq!(throttled.kind, FailureKind::Quota);
        assert_eq!(throttled.message, "HTTP 429: Too Many Requests");

        let other = classify_failure(500, "");
        assert_eq!(other.kind, FailureKind::Other);
    }
}
