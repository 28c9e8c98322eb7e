use thiserror::Error;

use crate::isochrone::GridDiagnostics;

#[derive(Error, Debug)]
pub enum Error {
    /// The polygon is not analyzable. Callers report zeroed counts instead of aborting.
    #[error("polygon has {found} distinct vertices, at least 3 are required")]
    InsufficientVertices { found: usize },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} reported {status}: {message}")]
    Provider {
        provider: &'static str,
        status: String,
        message: String,
    },

    #[error("unexpected response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    #[error("time limit must be between 1 and {max} minutes, got {minutes}")]
    InvalidTimeBudget { minutes: u32, max: u32 },

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("{0}")]
    InsufficientReachable(Box<GridDiagnostics>),

    #[error("generated polygon is empty, unable to construct geofence")]
    EmptyHull,

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Upper bound on provider bodies carried inside errors
    pub const BODY_LIMIT: usize = 800;

    pub(crate) fn status(provider: &'static str, status: u16, body: &str) -> Self {
        Error::Status {
            provider,
            status,
            body: body.chars().take(Self::BODY_LIMIT).collect(),
        }
    }

    pub(crate) fn invalid(provider: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidResponse {
            provider,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
