use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::PLACES_BASE_URL;
use crate::error::{Error, Result};
use crate::http;
use crate::models::{CandidatePlace, Vertex};
use crate::ports::{NearbyRequest, PlaceSearchProvider, PlacesPage, TextRequest};

const PROVIDER: &str = "google places";

/// Nearby and text search against the Places web service
pub struct GooglePlaces {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: Option<String>,
    #[serde(default)]
    name: String,
    geometry: Option<PlaceGeometry>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GooglePlaces {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http::client(timeout)?,
            api_key: api_key.into(),
            base_url: PLACES_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<PlacesPage> {
        let mut params = params.to_vec();
        params.push(("key", self.api_key.clone()));
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), &params)?;

        let response = self.client.get(url).send().await?;
        let body: PlacesResponse = http::read_json(PROVIDER, response).await?;

        match body.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(PlacesPage::default()),
            _ => {
                return Err(Error::Provider {
                    provider: PROVIDER,
                    status: body.status,
                    message: body.error_message.unwrap_or_default(),
                })
            }
        }

        let total = body.results.len();
        let places: Vec<CandidatePlace> = body.results.into_iter().filter_map(into_candidate).collect();
        if places.len() < total {
            debug!("Dropped {} results without id or location", total - places.len());
        }

        Ok(PlacesPage {
            places,
            next_page_token: body.next_page_token,
        })
    }
}

fn into_candidate(result: PlaceResult) -> Option<CandidatePlace> {
    let id = result.place_id?;
    let location = result.geometry?.location?;
    Some(CandidatePlace::new(id, result.name, Vertex::new(location.lat, location.lng)).with_types(result.types))
}

fn location_param(center: Vertex) -> String {
    format!("{},{}", center.lat, center.lng)
}

#[async_trait]
impl PlaceSearchProvider for GooglePlaces {
    async fn nearby(&self, request: &NearbyRequest) -> Result<PlacesPage> {
        let mut params = vec![
            ("location", location_param(request.center)),
            ("radius", request.radius_m.to_string()),
        ];
        if let Some(place_type) = &request.place_type {
            params.push(("type", place_type.clone()));
        }
        if let Some(keyword) = &request.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(token) = &request.page_token {
            params.push(("pagetoken", token.clone()));
        }

        self.fetch("nearbysearch/json", &params).await
    }

    async fn text_search(&self, request: &TextRequest) -> Result<PlacesPage> {
        let params = vec![
            ("query", request.query.clone()),
            ("location", location_param(request.center)),
            ("radius", request.radius_m.to_string()),
        ];

        self.fetch("textsearch/json", &params).await
    }
}
