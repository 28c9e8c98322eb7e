//! Mapbox Isochrone API adapter.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::error::{Error, Result};
use crate::http;
use crate::ports::{IsochroneProvider, IsochroneRequest};
use crate::retry::RetryPolicy;

pub const BASE_URL: &str = "https://api.mapbox.com";

const PROVIDER: &str = "mapbox";

pub struct MapboxIsochrone {
    client: Client,
    token: String,
    base_url: String,
    retry: RetryPolicy,
}

impl MapboxIsochrone {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http::client(timeout)?,
            token: token.into(),
            base_url: BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Request URL, access token included
    pub fn request_url(&self, request: &IsochroneRequest) -> Result<Url> {
        let endpoint = format!(
            "{}/isochrone/v1/mapbox/{}/{},{}",
            self.base_url,
            request.profile.as_str(),
            request.center.lng,
            request.center.lat
        );

        let mut params = vec![
            ("contours_minutes", request.minutes.to_string()),
            ("polygons", "true".to_string()),
            ("denoise", request.denoise.to_string()),
            ("generalize", request.generalize_meters.to_string()),
            ("access_token", self.token.clone()),
        ];
        if let Some(depart_at) = &request.depart_at {
            params.push(("depart_at", depart_at.clone()));
        }

        Ok(Url::parse_with_params(&endpoint, &params)?)
    }

    async fn fetch(&self, url: &Url) -> Result<geojson::FeatureCollection> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                if e.is_connect() {
                    error!("Could not reach {}, check DNS, proxy or VPN settings", self.base_url);
                }
                return Err(e.into());
            }
        };
        http::read_json(PROVIDER, response).await
    }
}

#[async_trait]
impl IsochroneProvider for MapboxIsochrone {
    async fn isochrone(&self, request: &IsochroneRequest) -> Result<geojson::FeatureCollection> {
        let url = self.request_url(request)?;
        debug!(
            "Mapbox isochrone {} {} min at ({}, {})",
            request.profile, request.minutes, request.center.lat, request.center.lng
        );

        let collection = self.retry.run("Mapbox isochrone request", || self.fetch(&url)).await?;

        if collection.features.is_empty() {
            return Err(Error::invalid(PROVIDER, "response has no features"));
        }
        Ok(collection)
    }
}
