//! Deterministic provider fakes for unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{CandidatePlace, TravelMode, Vertex};
use crate::ports::{
    FailureKind, IsochroneProvider, IsochroneRequest, NearbyRequest, PlaceSearchProvider,
    PlacesPage, ProviderFailure, TextRequest, TravelTimeProvider,
};

pub fn place(id: &str, name: &str, lat: f64, lng: f64, types: &[&str]) -> CandidatePlace {
    CandidatePlace::new(id, name, Vertex::new(lat, lng)).with_types(types.iter().copied())
}

fn fake_failure() -> Error {
    Error::status("fake", 500, "injected failure")
}

/// Places provider answering from canned pages keyed by `type=..` / `keyword=..`
#[derive(Default)]
pub struct FakePlaces {
    nearby: HashMap<String, Vec<Vec<CandidatePlace>>>,
    text: HashMap<String, Vec<CandidatePlace>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn with_pages(mut self, label: &str, pages: Vec<Vec<CandidatePlace>>) -> Self {
        self.nearby.insert(label.to_string(), pages);
        self
    }

    pub fn with_text(mut self, query: &str, places: Vec<CandidatePlace>) -> Self {
        self.text.insert(query.to_string(), places);
        self
    }

    pub fn failing(mut self, label: &str) -> Self {
        self.failing.insert(label.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn label(request: &NearbyRequest) -> String {
        match (&request.place_type, &request.keyword) {
            (Some(t), _) => format!("type={}", t),
            (None, Some(k)) => format!("keyword={}", k),
            (None, None) => "all".to_string(),
        }
    }
}

#[async_trait]
impl PlaceSearchProvider for FakePlaces {
    async fn nearby(&self, request: &NearbyRequest) -> Result<PlacesPage> {
        let label = Self::label(request);
        let index: usize = request
            .page_token
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0);
        self.calls
            .lock()
            .unwrap()
            .push(format!("nearby:{}:{}", label, index));

        if self.failing.contains(&label) {
            return Err(fake_failure());
        }

        let pages = self.nearby.get(&label).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < pages.len()).then(|| (index + 1).to_string());
        Ok(PlacesPage {
            places: pages.get(index).cloned().unwrap_or_default(),
            next_page_token,
        })
    }

    async fn text_search(&self, request: &TextRequest) -> Result<PlacesPage> {
        let label = format!("text={}", request.query);
        self.calls.lock().unwrap().push(label.clone());

        if self.failing.contains(&label) {
            return Err(fake_failure());
        }

        Ok(PlacesPage {
            places: self.text.get(&request.query).cloned().unwrap_or_default(),
            next_page_token: None,
        })
    }
}

/// Travel-time provider computing durations from a closure, per mode
pub struct FakeRoutes<F> {
    duration: F,
    failure: Option<ProviderFailure>,
    calls: Mutex<Vec<TravelMode>>,
    probes: Mutex<usize>,
}

impl<F> FakeRoutes<F>
where
    F: Fn(Vertex, TravelMode) -> Option<f64> + Send + Sync,
{
    pub fn new(duration: F) -> Self {
        Self {
            duration,
            failure: Some(ProviderFailure {
                kind: FailureKind::Authorization,
                message: "API Error (403): key rejected".to_string(),
            }),
            calls: Mutex::new(Vec::new()),
            probes: Mutex::new(0),
        }
    }

    pub fn mode_calls(&self) -> Vec<TravelMode> {
        self.calls.lock().unwrap().clone()
    }

    pub fn probes(&self) -> usize {
        *self.probes.lock().unwrap()
    }
}

#[async_trait]
impl<F> TravelTimeProvider for FakeRoutes<F>
where
    F: Fn(Vertex, TravelMode) -> Option<f64> + Send + Sync,
{
    async fn travel_time(&self, _origin: Vertex, destination: Vertex, mode: TravelMode) -> Result<f64> {
        self.calls.lock().unwrap().push(mode);
        (self.duration)(destination, mode).ok_or_else(fake_failure)
    }

    async fn diagnose(&self, _origin: Vertex, _destination: Vertex) -> Option<ProviderFailure> {
        *self.probes.lock().unwrap() += 1;
        self.failure.clone()
    }
}

/// Isochrone provider replaying queued responses
#[derive(Default)]
pub struct FakeIsochrone {
    responses: Mutex<VecDeque<Result<geojson::FeatureCollection>>>,
    requests: Mutex<Vec<IsochroneRequest>>,
}

impl FakeIsochrone {
    pub fn returning(json: serde_json::Value) -> Self {
        let fake = Self::default();
        let collection = serde_json::from_value(json).map_err(Error::from);
        fake.responses.lock().unwrap().push_back(collection);
        fake
    }

    pub fn requests(&self) -> Vec<IsochroneRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IsochroneProvider for FakeIsochrone {
    async fn isochrone(&self, request: &IsochroneRequest) -> Result<geojson::FeatureCollection> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(fake_failure()))
    }
}
