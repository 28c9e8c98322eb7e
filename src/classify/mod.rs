//! Category classification of candidate places.
//!
//! Each category owns an ordered rule table ([`rules`]) evaluated by one
//! generic matcher ([`matcher`]). Categories are independent: a place may count
//! once in every category it satisfies.

pub mod matcher;
pub mod rules;

use hashbrown::HashSet;

use crate::geometry::point_in_polygon;
use crate::models::{CandidatePlace, Category, Polygon};

pub use matcher::{Polarity, Rule, RuleSet};
pub use rules::rule_set;

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Does `place` satisfy the category's rules (ignoring location)?
    pub fn matches(&self, category: Category, place: &CandidatePlace) -> bool {
        rule_set(category).evaluate(&place.folded_name(), &place.folded_types())
    }

    /// Every category `place` satisfies
    pub fn categories_of(&self, place: &CandidatePlace) -> Vec<Category> {
        let name = place.folded_name();
        let types = place.folded_types();
        Category::all()
            .iter()
            .copied()
            .filter(|c| rule_set(*c).evaluate(&name, &types))
            .collect()
    }

    /// Number of distinct places inside `polygon` that match `category`
    pub fn count(&self, category: Category, polygon: &Polygon, places: &[CandidatePlace]) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        places
            .iter()
            .filter(|p| point_in_polygon(p.location, polygon.vertices()))
            .filter(|p| self.matches(category, p))
            .filter(|p| seen.insert(p.id.as_str()))
            .count()
    }
}
