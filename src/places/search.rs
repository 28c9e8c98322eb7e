//! Paginating, deduplicating search over a places provider.

use hashbrown::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{Query, SearchPlan};
use crate::models::{BoundingBox, CandidatePlace, Vertex};
use crate::ports::{NearbyRequest, PlaceSearchProvider, TextRequest};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Result cap per query, pagination stops once reached
    pub max_results: usize,
    /// Delay the provider requires before a page token becomes valid
    pub page_token_delay: Duration,
    /// Also run a text search for keyword queries that stay under the cap
    pub text_fallback: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 60,
            page_token_delay: Duration::from_secs(2),
            text_fallback: true,
        }
    }
}

/// Place search adapter
pub struct PlaceSearch<P> {
    provider: P,
    options: SearchOptions,
}

impl<P: PlaceSearchProvider> PlaceSearch<P> {
    pub fn new(provider: P, options: SearchOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run every query of `plan` around the box and merge the results.
    ///
    /// Deduplicated by place identity, first occurrence wins. A failing request is
    /// logged and skipped; whatever the query returned before failing is kept, and
    /// a keyword query still gets its text search when nearby search fails.
    pub async fn search(&self, bbox: &BoundingBox, plan: &SearchPlan) -> Vec<CandidatePlace> {
        let center = bbox.center();
        let radius_m = bbox.search_radius_m();

        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::new();

        for query in plan.queries() {
            let mut results = Vec::new();
            self.run_query(center, radius_m, query, &mut results).await;
            debug!("Place search {} returned {} places", query, results.len());

            for place in results {
                if seen.insert(place.id.clone()) {
                    unique.push(place);
                }
            }
        }

        info!(
            "Found {} unique candidate places within {}m of ({}, {})",
            unique.len(),
            radius_m,
            center.lat,
            center.lng
        );

        unique
    }

    async fn run_query(
        &self,
        center: Vertex,
        radius_m: u32,
        query: Query,
        results: &mut Vec<CandidatePlace>,
    ) {
        let cap = self.options.max_results;
        let (place_type, keyword) = match query {
            Query::Type(t) => (Some(t.to_string()), None),
            Query::Keyword(k) => (None, Some(k.to_string())),
        };

        let mut request = NearbyRequest {
            center,
            radius_m,
            place_type,
            keyword,
            page_token: None,
        };

        loop {
            let page = match self.provider.nearby(&request).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Place search {} failed, skipping: {}", query, e);
                    break;
                }
            };
            results.extend(page.places);

            match page.next_page_token {
                Some(token) if results.len() < cap => {
                    if !self.options.page_token_delay.is_zero() {
                        tokio::time::sleep(self.options.page_token_delay).await;
                    }
                    request.page_token = Some(token);
                }
                _ => break,
            }
        }

        if let Query::Keyword(keyword) = query {
            if self.options.text_fallback && results.len() < cap {
                let text = TextRequest {
                    query: keyword.to_string(),
                    center,
                    radius_m,
                };
                match self.provider.text_search(&text).await {
                    Ok(page) => results.extend(page.places),
                    Err(e) => warn!("Text search '{}' failed, skipping: {}", keyword, e),
                }
            }
        }

        results.truncate(cap);
    }
}
