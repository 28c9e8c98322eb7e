//! Google Maps Platform adapters: Places (legacy web service) for candidate
//! search and Routes `computeRoutes` for point-to-point travel times.

pub mod places;
pub mod routes;

pub use places::GooglePlaces;
pub use routes::{classify_failure, parse_duration_seconds, GoogleRoutes};

pub const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const ROUTES_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";
