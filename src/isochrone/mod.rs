//! Isochrone builders.
//!
//! [`ProviderIsochroneBuilder`] asks a polygon-returning provider and extracts one
//! ring. [`GridIsochroneBuilder`] samples travel times on a grid and hulls the
//! reachable points.

mod extract;
mod grid;

pub use extract::{select_ring, ProviderIsochroneBuilder};
pub use grid::{candidate_points, GridIsochroneBuilder, GridOptions};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{TravelMode, Vertex};
use crate::ports::ProviderFailure;

/// Fewest reachable points a hull is built from
pub const MIN_REACHABLE: usize = 3;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 20;

pub(crate) fn validate_center(center: Vertex) -> Result<()> {
    if center.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidCoordinate {
            lat: center.lat,
            lng: center.lng,
        })
    }
}

/// Why a grid run ended with too few reachable points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallCause {
    /// More travel-time calls failed than succeeded
    ProviderFailures,
    /// Most answered points lie beyond the time budget
    OverBudget,
    Sparse,
    /// Enough reachable points, but all on one line
    Collinear,
}

/// Counters of one grid run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDiagnostics {
    pub minutes: u32,
    pub primary_mode: TravelMode,
    pub fallback_mode: Option<TravelMode>,
    pub candidates: usize,
    pub successes: usize,
    pub failures: usize,
    pub reachable: usize,
    pub over_limit: usize,
    /// Points answered only by the fallback mode
    pub fallback_hits: usize,
    /// Most recent classified probe failure
    pub last_failure: Option<ProviderFailure>,
}

impl GridDiagnostics {
    pub fn new(minutes: u32, primary_mode: TravelMode, fallback_mode: Option<TravelMode>) -> Self {
        Self {
            minutes,
            primary_mode,
            fallback_mode,
            candidates: 0,
            successes: 0,
            failures: 0,
            reachable: 0,
            over_limit: 0,
            fallback_hits: 0,
            last_failure: None,
        }
    }

    pub fn cause(&self) -> ShortfallCause {
        if self.reachable >= MIN_REACHABLE {
            ShortfallCause::Collinear
        } else if self.failures > self.successes {
            ShortfallCause::ProviderFailures
        } else if self.over_limit > self.reachable {
            ShortfallCause::OverBudget
        } else {
            ShortfallCause::Sparse
        }
    }
}

impl std::fmt::Display for GridDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cause() == ShortfallCause::Collinear {
            writeln!(
                f,
                "all {} reachable points are collinear, no area to enclose",
                self.reachable
            )?;
        } else {
            writeln!(
                f,
                "not enough reachable points found ({}/{} minimum)",
                self.reachable, MIN_REACHABLE
            )?;
        }
        writeln!(
            f,
            "diagnostics: {} candidates, {} successful calls, {} failures, {} over the time limit",
            self.candidates, self.successes, self.failures, self.over_limit
        )?;

        match self.cause() {
            ShortfallCause::ProviderFailures => {
                let modes = match self.fallback_mode {
                    Some(fallback) => format!("{} and {}", self.primary_mode, fallback),
                    None => self.primary_mode.to_string(),
                };
                writeln!(f, "most travel-time calls failed in {}", modes)?;
                if let Some(failure) = &self.last_failure {
                    writeln!(f, "last error ({}): {}", failure.kind, failure.message)?;
                }
                write!(
                    f,
                    "check that the key has the Routes API enabled, billing and quota status, and network connectivity"
                )
            }
            ShortfallCause::OverBudget => write!(
                f,
                "most points ({}) exceed the time limit ({} min); increase the time limit or use a smaller area",
                self.over_limit, self.minutes
            ),
            ShortfallCause::Sparse => write!(
                f,
                "increase the time limit (try 15-20 minutes) or the grid resolution"
            ),
            ShortfallCause::Collinear => write!(f, "increase the grid resolution or the time limit"),
        }
    }
}
