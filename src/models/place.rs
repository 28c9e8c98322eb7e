//! Candidate places returned by the search provider and the categories they are counted under.

use serde::{Deserialize, Serialize};

use super::Vertex;

/// Category a place can be counted under.
///
/// Categories are evaluated independently; a place may satisfy several.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Restaurants, cafes, juice and food shops
    Eatery,
    /// Corporate offices, companies, co-working spaces
    Office,
    /// Apartment buildings and residential complexes
    Apartment,
    /// Paying-guest accommodation, hostels, co-living, service apartments
    PayingGuest,
    /// Gyms and fitness centres
    Gym,
    /// Beauty and hair salons, barbers, spas
    Salon,
}

impl Category {
    /// All categories in reporting order
    pub fn all() -> &'static [Category] {
        &[
            Category::Eatery,
            Category::Office,
            Category::Apartment,
            Category::PayingGuest,
            Category::Gym,
            Category::Salon,
        ]
    }

    /// Get the field name for this category
    pub fn field_name(&self) -> &'static str {
        match self {
            Category::Eatery => "eatery",
            Category::Office => "office",
            Category::Apartment => "apartment",
            Category::PayingGuest => "paying_guest",
            Category::Gym => "gym",
            Category::Salon => "salon",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A provider-returned point of interest, before classification.
///
/// Ephemeral: only derived counts leave the analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlace {
    /// Opaque provider identity, used as the deduplication key
    pub id: String,
    pub name: String,
    pub location: Vertex,
    /// Raw provider type list (e.g. ["restaurant", "food", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,
}

impl CandidatePlace {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Vertex) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            types: Vec::new(),
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Case-folded name
    pub fn folded_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-folded type tags
    pub fn folded_types(&self) -> Vec<String> {
        self.types.iter().map(|t| t.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_field_names_unique() {
        let mut names: Vec<&str> = Category::all().iter().map(|c| c.field_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Category::all().len());
    }

    #[test]
    fn test_category_serde_matches_field_name() {
        for category in Category::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.field_name()));
        }
    }
}
