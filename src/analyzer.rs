//! Polygon analysis: per-category counts of places inside a polygon.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::classify::Classifier;
use crate::geometry::bounding_box;
use crate::models::{Category, Polygon};
use crate::places::{PlaceSearch, SearchPlan};
use crate::ports::PlaceSearchProvider;
use crate::wkt;

/// Count of matching places per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<Category, usize>);

impl CategoryCounts {
    /// Zero for every requested category
    pub fn zeroed(categories: &[Category]) -> Self {
        Self(categories.iter().map(|c| (*c, 0)).collect())
    }

    pub fn get(&self, category: Category) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn set(&mut self, category: Category, count: usize) {
        self.0.insert(category, count);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

/// Outcome of one polygon at the batch boundary.
///
/// Never an error: an unanalyzable polygon yields zeroed counts and a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub name: String,
    pub analyzable: bool,
    /// Malformed WKT coordinate pairs that were dropped
    pub skipped_pairs: usize,
    pub counts: CategoryCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub struct Analyzer<P> {
    search: PlaceSearch<P>,
    classifier: Classifier,
}

impl<P: PlaceSearchProvider> Analyzer<P> {
    pub fn new(search: PlaceSearch<P>) -> Self {
        Self {
            search,
            classifier: Classifier::new(),
        }
    }

    pub fn search(&self) -> &PlaceSearch<P> {
        &self.search
    }

    /// Count places inside `polygon` for each category.
    ///
    /// Each category runs its own provider queries; provider failures only
    /// reduce the candidate set.
    pub async fn analyze(&self, polygon: &Polygon, categories: &[Category]) -> CategoryCounts {
        let bbox = bounding_box(polygon);
        let mut counts = CategoryCounts::zeroed(categories);

        for &category in categories {
            let plan = SearchPlan::for_category(category);
            let candidates = self.search.search(&bbox, &plan).await;
            let count = self.classifier.count(category, polygon, &candidates);
            info!("  Found {} {} places", count, category);
            counts.set(category, count);
        }

        counts
    }

    /// Parse and analyze one named WKT polygon, degrading to zeroed counts.
    pub async fn analyze_wkt(&self, name: &str, wkt: &str, categories: &[Category]) -> AnalysisRecord {
        info!("Analyzing polygon {}...", name);

        let parsed = wkt::parse(wkt);
        let skipped_pairs = parsed.skipped;

        match parsed.into_polygon() {
            Ok(polygon) => AnalysisRecord {
                name: name.to_string(),
                analyzable: true,
                skipped_pairs,
                counts: self.analyze(&polygon, categories).await,
                note: None,
            },
            Err(e) => {
                warn!("Polygon '{}' is not analyzable, reporting zero counts: {}", name, e);
                AnalysisRecord {
                    name: name.to_string(),
                    analyzable: false,
                    skipped_pairs,
                    counts: CategoryCounts::zeroed(categories),
                    note: Some(e.to_string()),
                }
            }
        }
    }
}
