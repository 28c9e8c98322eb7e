use std::time::Duration;

use catchment::google::GoogleRoutes;
use catchment::models::TravelMode;
use catchment::ports::{FailureKind, TravelTimeProvider};
use catchment::{Error, Vertex};
use httpmock::prelude::*;
use serde_json::json;

const PATH: &str = "/directions/v2:computeRoutes";

fn client(url: String) -> GoogleRoutes {
    GoogleRoutes::new("routes-key", Duration::from_secs(5), Duration::from_secs(2))
        .unwrap()
        .with_url(url)
}

fn origin() -> Vertex {
    Vertex::new(12.9716, 77.5946)
}

fn destination() -> Vertex {
    Vertex::new(12.9816, 77.6046)
}

#[tokio::test]
async fn test_traffic_aware_drive_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("X-Goog-Api-Key", "routes-key")
                .header(
                    "X-Goog-FieldMask",
                    "routes.duration,routes.distanceMeters,routes.legs.duration,routes.legs.distanceMeters",
                )
                .json_body_partial(
                    r#"{
                        "travelMode": "DRIVE",
                        "routingPreference": "TRAFFIC_AWARE",
                        "trafficModel": "BEST_GUESS",
                        "origin": {"location": {"latLng": {"latitude": 12.9716, "longitude": 77.5946}}}
                    }"#,
                );
            then.status(200)
                .json_body(json!({"routes": [{"duration": "420s", "distanceMeters": 2100}]}));
        })
        .await;

    let secs = client(server.url(PATH))
        .travel_time(origin(), destination(), TravelMode::Drive)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(secs, 420.0);
}

#[tokio::test]
async fn test_leg_durations_summed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(json!({
                "routes": [{"legs": [{"duration": "100s"}, {"duration": {"seconds": "80"}}]}]
            }));
        })
        .await;

    let secs = client(server.url(PATH))
        .travel_time(origin(), destination(), TravelMode::TwoWheeler)
        .await
        .unwrap();

    assert_eq!(secs, 180.0);
}

#[tokio::test]
async fn test_empty_routes_is_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(json!({}));
        })
        .await;

    let err = client(server.url(PATH))
        .travel_time(origin(), destination(), TravelMode::Walk)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_http_error_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(503).body("unavailable");
        })
        .await;

    let err = client(server.url(PATH))
        .travel_time(origin(), destination(), TravelMode::Drive)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_diagnose_authorization() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("X-Goog-FieldMask", "routes.duration")
                .json_body_partial(r#"{"travelMode": "DRIVE"}"#);
            then.status(403).json_body(json!({
                "error": {
                    "code": 403,
                    "message": "Routes API has not been used in project 42",
                    "status": "PERMISSION_DENIED"
                }
            }));
        })
        .await;

    let failure = client(server.url(PATH))
        .diagnose(origin(), destination())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(failure.kind, FailureKind::Authorization);
    assert_eq!(
        failure.message,
        "API Error (403): Routes API has not been used in project 42"
    );
}

#[tokio::test]
async fn test_diagnose_quota() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(429).body("rate limited");
        })
        .await;

    let failure = client(server.url(PATH))
        .diagnose(origin(), destination())
        .await
        .unwrap();

    assert_eq!(failure.kind, FailureKind::Quota);
    assert_eq!(failure.message, "HTTP 429: rate limited");
}

#[tokio::test]
async fn test_diagnose_healthy() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(json!({"routes": [{"duration": "60s"}]}));
        })
        .await;

    let failure = client(server.url(PATH)).diagnose(origin(), destination()).await;

    assert!(failure.is_none());
}

#[tokio::test]
async fn test_diagnose_network() {
    let failure = client("http://127.0.0.1:9/directions/v2:computeRoutes".to_string())
        .diagnose(origin(), destination())
        .await
        .unwrap();

    assert_eq!(failure.kind, FailureKind::Network);
    assert!(failure.message.starts_with("Network error"));
}
