//! Place search: per-category query plans and the paginating, deduplicating
//! search over a places provider.

mod plan;
mod search;

pub use plan::{Query, SearchPlan};
pub use search::{PlaceSearch, SearchOptions};
