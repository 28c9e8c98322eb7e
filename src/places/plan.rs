//! Which provider queries gather the candidates for each category.

use crate::models::Category;

/// A single provider query: by place type or by keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Type(&'static str),
    Keyword(&'static str),
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Type(t) => write!(f, "type={}", t),
            Query::Keyword(k) => write!(f, "keyword={}", k),
        }
    }
}

/// Provider types and keywords searched for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    pub types: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl SearchPlan {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Eatery => SearchPlan {
                types: &["restaurant", "food", "cafe", "meal_takeaway"],
                keywords: &["juice", "food shop", "food court", "dining"],
            },
            Category::Office => SearchPlan {
                types: &["establishment", "point_of_interest"],
                keywords: &[
                    "corporate office",
                    "company",
                    "technical company",
                    "insurance company",
                    "co-working space",
                    "coworking space",
                    "software company",
                    "co-working",
                    "coworking",
                ],
            },
            Category::Apartment => SearchPlan {
                types: &["lodging"],
                keywords: &[
                    "apartment building",
                    "apartment buildings",
                    "apartment complex",
                    "residency",
                    "residential building",
                    "residential buildings",
                    "apartment",
                    "apartments",
                    "residential",
                    "complex",
                    "residence",
                ],
            },
            Category::PayingGuest => SearchPlan {
                types: &["lodging"],
                keywords: &[
                    "PG",
                    "PGs",
                    "hostel",
                    "hostels",
                    "co-living",
                    "coliving",
                    "paying guest",
                    "service apartment",
                    "service apartments",
                ],
            },
            Category::Gym => SearchPlan {
                types: &["gym"],
                keywords: &[
                    "gym",
                    "fitness centre",
                    "fitness center",
                    "fitness centres",
                    "fitness centers",
                    "sports complex",
                    "fitness",
                    "workout",
                ],
            },
            Category::Salon => SearchPlan {
                types: &["beauty_salon", "hair_care"],
                keywords: &[
                    "salon",
                    "beauty salon",
                    "hair salon",
                    "barber",
                    "barber shop",
                    "haircut",
                    "spa",
                    "beauty parlor",
                    "beauty parlour",
                    "hair care",
                    "haircutting",
                    "hair styling",
                    "unisex salon",
                ],
            },
        }
    }

    /// Type queries first, then keyword queries
    pub fn queries(&self) -> impl Iterator<Item = Query> + '_ {
        self.types
            .iter()
            .copied()
            .map(Query::Type)
            .chain(self.keywords.iter().copied().map(Query::Keyword))
    }
}
