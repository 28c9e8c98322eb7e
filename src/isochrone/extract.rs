//! Isochrone from a polygon-returning provider.

use chrono::Utc;
use geojson::Value;
use tracing::{debug, info};

use super::{validate_center, MIN_MINUTES};
use crate::error::{Error, Result};
use crate::models::isochrone::{evening_departure, format_departure};
use crate::models::{IsochroneResult, Polygon, RoutingProfile, Vertex};
use crate::ports::{IsochroneProvider, IsochroneRequest};

/// Largest contour the provider accepts
pub const PROVIDER_MAX_MINUTES: u32 = 60;

pub struct ProviderIsochroneBuilder<P> {
    provider: P,
    denoise: f64,
    generalize_meters: f64,
}

impl<P: IsochroneProvider> ProviderIsochroneBuilder<P> {
    /// Builder requesting full-fidelity polygons
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            denoise: 0.0,
            generalize_meters: 0.0,
        }
    }

    pub fn with_smoothing(mut self, denoise: f64, generalize_meters: f64) -> Self {
        self.denoise = denoise;
        self.generalize_meters = generalize_meters;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Request an isochrone around `center` and extract its exterior ring.
    ///
    /// `driving-traffic` without a departure time departs at the next 18:00 UTC.
    pub async fn build(
        &self,
        center: Vertex,
        minutes: u32,
        profile: RoutingProfile,
        depart_at: Option<String>,
    ) -> Result<IsochroneResult> {
        validate_center(center)?;
        if !(MIN_MINUTES..=PROVIDER_MAX_MINUTES).contains(&minutes) {
            return Err(Error::InvalidTimeBudget {
                minutes,
                max: PROVIDER_MAX_MINUTES,
            });
        }

        let depart_at = match (profile, depart_at) {
            (_, Some(at)) => Some(at),
            (RoutingProfile::DrivingTraffic, None) => {
                Some(format_departure(evening_departure(Utc::now())))
            }
            (_, None) => None,
        };

        let request = IsochroneRequest {
            center,
            minutes,
            profile,
            depart_at,
            denoise: self.denoise,
            generalize_meters: self.generalize_meters,
        };

        info!(
            "Requesting {} min {} isochrone around ({}, {})",
            minutes, profile, center.lat, center.lng
        );
        let collection = self.provider.isochrone(&request).await?;

        let feature = collection
            .features
            .first()
            .ok_or_else(|| Error::invalid("isochrone", "response has no features"))?;
        let ring = feature
            .geometry
            .as_ref()
            .and_then(|g| select_ring(&g.value))
            .ok_or_else(|| Error::invalid("isochrone", "could not extract polygon ring"))?;

        debug!("Extracted isochrone ring with {} vertices", ring.len());

        Ok(IsochroneResult {
            polygon: Polygon::new(ring)?,
            center,
            minutes,
        })
    }
}

/// Exterior ring of a polygon geometry, closed.
///
/// For a multi-polygon the ring with the most vertices is taken. Vertex count is
/// only a proxy for area; a finely traced small part can win over a coarse large
/// one.
pub fn select_ring(geometry: &Value) -> Option<Vec<Vertex>> {
    let ring = match geometry {
        Value::Polygon(rings) => rings.first().filter(|r| !r.is_empty()),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .filter(|r| !r.is_empty())
            .fold(None, |best: Option<&Vec<Vec<f64>>>, ring| match best {
                Some(b) if b.len() >= ring.len() => Some(b),
                _ => Some(ring),
            }),
        _ => None,
    }?;

    let mut vertices: Vec<Vertex> = ring
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| Vertex::new(position[1], position[0]))
        .collect();

    let first = *vertices.first()?;
    if vertices.last() != Some(&first) {
        vertices.push(first);
    }
    Some(vertices)
}
