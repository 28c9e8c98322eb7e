use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::google::{PLACES_BASE_URL, ROUTES_URL};
use crate::isochrone::GridOptions;
use crate::models::TravelMode;
use crate::places::SearchOptions;
use crate::retry::RetryPolicy;

pub const GOOGLE_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_API_TOKEN";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub google: GoogleConfig,
    pub mapbox: MapboxConfig,
    pub grid: GridConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleConfig {
    pub api_key: String,
    pub places_url: String,
    pub routes_url: String,
    pub search_timeout_secs: u64,
    pub routes_timeout_secs: u64,
    pub probe_timeout_secs: u64,
    pub page_token_delay_ms: u64,
    pub max_results: usize,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            places_url: PLACES_BASE_URL.to_string(),
            routes_url: ROUTES_URL.to_string(),
            search_timeout_secs: 10,
            routes_timeout_secs: 20,
            probe_timeout_secs: 10,
            page_token_delay_ms: 2000,
            max_results: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapboxConfig {
    pub token: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub backoff_ms: u64,
    pub denoise: f64,
    pub generalize_meters: f64,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: crate::mapbox::BASE_URL.to_string(),
            timeout_secs: 30,
            retry_attempts: 3,
            backoff_ms: 700,
            denoise: 0.0,
            generalize_meters: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub resolution: usize,
    pub average_speed_mps: f64,
    pub radius_buffer: f64,
    pub call_delay_ms: u64,
    /// `None` disables the fallback mode
    pub fallback_mode: Option<TravelMode>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: 50,
            average_speed_mps: 8.3,
            radius_buffer: 1.3,
            call_delay_ms: 50,
            fallback_mode: Some(TravelMode::TwoWheeler),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Fill credentials from the environment, environment wins
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(GOOGLE_KEY_ENV).ok(),
            std::env::var(MAPBOX_TOKEN_ENV).ok(),
        )
    }

    fn with_overrides(mut self, google_key: Option<String>, mapbox_token: Option<String>) -> Self {
        if let Some(key) = google_key.filter(|k| !k.trim().is_empty()) {
            self.google.api_key = key;
        }
        if let Some(token) = mapbox_token.filter(|t| !t.trim().is_empty()) {
            self.mapbox.token = token;
        }
        self
    }
}

impl GoogleConfig {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.max_results,
            page_token_delay: Duration::from_millis(self.page_token_delay_ms),
            ..SearchOptions::default()
        }
    }
}

impl MapboxConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

impl GridConfig {
    pub fn options(&self) -> GridOptions {
        GridOptions {
            resolution: self.resolution,
            average_speed_mps: self.average_speed_mps,
            radius_buffer: self.radius_buffer,
            call_delay: Duration::from_millis(self.call_delay_ms),
            fallback_mode: self.fallback_mode,
        }
    }
}
