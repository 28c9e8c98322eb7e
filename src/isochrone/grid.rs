//! Isochrone by grid sampling: point-to-point travel times around the center,
//! then the convex hull of every point reached within the budget.

use std::time::Duration;
use tracing::{debug, info};

use super::{validate_center, GridDiagnostics, MAX_MINUTES, MIN_MINUTES, MIN_REACHABLE};
use crate::error::{Error, Result};
use crate::geometry::{convex_hull, haversine_m, METERS_PER_DEGREE};
use crate::models::{IsochroneResult, TravelMode, Vertex};
use crate::ports::TravelTimeProvider;

#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Samples per axis
    pub resolution: usize,
    /// Optimistic average speed used to size the sampled circle
    pub average_speed_mps: f64,
    pub radius_buffer: f64,
    /// Pause between travel-time calls
    pub call_delay: Duration,
    /// Mode tried when the primary mode fails for a point
    pub fallback_mode: Option<TravelMode>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            resolution: 50,
            average_speed_mps: 8.3,
            radius_buffer: 1.3,
            call_delay: Duration::from_millis(50),
            fallback_mode: Some(TravelMode::TwoWheeler),
        }
    }
}

impl GridOptions {
    /// Radius of the sampled circle for a time budget (meters)
    pub fn search_radius_m(&self, minutes: u32) -> f64 {
        f64::from(minutes) * 60.0 * self.average_speed_mps * self.radius_buffer
    }
}

/// `resolution`×`resolution` grid over the circle's bounding square, keeping the
/// points within `radius_m` of `center`.
pub fn candidate_points(center: Vertex, radius_m: f64, resolution: usize) -> Vec<Vertex> {
    let lat_span = radius_m / METERS_PER_DEGREE;
    let lng_span = radius_m / (METERS_PER_DEGREE * center.lat.to_radians().cos().max(0.0001));

    let lats = linspace(center.lat - lat_span, center.lat + lat_span, resolution);
    let lngs = linspace(center.lng - lng_span, center.lng + lng_span, resolution);

    let mut points = Vec::with_capacity(resolution * resolution);
    for &lat in &lats {
        for &lng in &lngs {
            let point = Vertex::new(lat, lng);
            if haversine_m(center, point) <= radius_m {
                points.push(point);
            }
        }
    }
    points
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

pub struct GridIsochroneBuilder<T> {
    provider: T,
    options: GridOptions,
}

impl<T: TravelTimeProvider> GridIsochroneBuilder<T> {
    pub fn new(provider: T, options: GridOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &T {
        &self.provider
    }

    /// Sample travel times from `center` and hull the reachable points.
    ///
    /// Every candidate is queried, farthest first. A point whose primary and
    /// fallback modes both fail gets one diagnostic probe and counts as a failure.
    /// Fewer than three reachable points is an [`Error::InsufficientReachable`].
    pub async fn build(&self, center: Vertex, minutes: u32, mode: TravelMode) -> Result<IsochroneResult> {
        validate_center(center)?;
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(Error::InvalidTimeBudget {
                minutes,
                max: MAX_MINUTES,
            });
        }

        let budget_secs = f64::from(minutes) * 60.0;
        let radius_m = self.options.search_radius_m(minutes);

        let mut points: Vec<(Vertex, f64)> = candidate_points(center, radius_m, self.options.resolution)
            .into_iter()
            .map(|p| (p, haversine_m(center, p)))
            .collect();
        points.sort_by(|a, b| b.1.total_cmp(&a.1));

        let fallback = self.options.fallback_mode.filter(|f| *f != mode);
        let mut diagnostics = GridDiagnostics::new(minutes, mode, fallback);
        diagnostics.candidates = points.len();

        info!(
            "Sampling {} candidate points within {:.0}m of ({}, {}) for {} min by {}",
            points.len(),
            radius_m,
            center.lat,
            center.lng,
            minutes,
            mode
        );

        let mut reachable = Vec::new();

        for (point, _) in points {
            let mut duration = self.travel_time(center, point, mode).await;

            if duration.is_none() {
                if let Some(fallback) = fallback {
                    duration = self.travel_time(center, point, fallback).await;
                    if duration.is_some() {
                        diagnostics.fallback_hits += 1;
                    }
                }
            }

            match duration {
                Some(secs) => {
                    diagnostics.successes += 1;
                    if secs <= budget_secs {
                        reachable.push(point);
                    } else {
                        diagnostics.over_limit += 1;
                    }
                }
                None => {
                    diagnostics.failures += 1;
                    if let Some(failure) = self.provider.diagnose(center, point).await {
                        debug!("Probe classified failure as {}: {}", failure.kind, failure.message);
                        diagnostics.last_failure = Some(failure);
                    }
                }
            }

            if !self.options.call_delay.is_zero() {
                tokio::time::sleep(self.options.call_delay).await;
            }
        }

        diagnostics.reachable = reachable.len();
        info!(
            "Diagnostics: {} successful calls, {} failures, {} reachable points, {} over time limit, {} via fallback",
            diagnostics.successes,
            diagnostics.failures,
            diagnostics.reachable,
            diagnostics.over_limit,
            diagnostics.fallback_hits
        );

        if reachable.len() < MIN_REACHABLE {
            return Err(Error::InsufficientReachable(Box::new(diagnostics)));
        }

        let polygon = match convex_hull(&reachable) {
            Ok(polygon) => polygon,
            Err(Error::EmptyHull) => {
                return Err(Error::InsufficientReachable(Box::new(diagnostics)));
            }
            Err(e) => return Err(e),
        };

        Ok(IsochroneResult {
            polygon,
            center,
            minutes,
        })
    }

    async fn travel_time(&self, origin: Vertex, destination: Vertex, mode: TravelMode) -> Option<f64> {
        match self.provider.travel_time(origin, destination, mode).await {
            Ok(secs) => Some(secs),
            Err(e) => {
                debug!("{} travel time to ({}, {}) failed: {}", mode, destination.lat, destination.lng, e);
                None
            }
        }
    }
}
