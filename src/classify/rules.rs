//! Per-category rule tables.
//!
//! Keywords are matched as case-folded substrings of the place name; types
//! against the case-folded provider type list.

use super::matcher::{Rule, RuleSet};
use crate::models::Category;

const EATERY: &[Rule] = &[
    Rule::include().types(&["restaurant", "food", "cafe", "meal_takeaway", "bakery", "bar"]),
    Rule::include().keywords(&["restaurant", "cafe", "juice", "food", "dining", "bistro"]),
];

const OFFICE: &[Rule] = &[
    Rule::include().keywords(&[
        "corporate office",
        "company",
        "technical company",
        "insurance company",
        "co-working space",
        "coworking space",
        "software company",
        "co-working",
        "coworking",
        "corporate",
        "ltd",
        "inc",
        "corporation",
        "pvt",
        "limited",
        "private limited",
        "software",
    ]),
    Rule::exclude().types(&[
        "restaurant",
        "cafe",
        "food",
        "store",
        "shopping_mall",
        "hospital",
        "school",
        "university",
        "park",
        "church",
        "mosque",
        "temple",
        "gas_station",
        "atm",
        "bank",
        "lodging",
    ]),
    Rule::exclude().keywords(&["restaurant", "cafe", "hotel", "resort", "mall", "store"]),
];

const APARTMENT_KEYWORDS: &[&str] = &[
    "apartment building",
    "apartment complex",
    "residency",
    "residential building",
    "apartment",
    "residential",
    "complex",
    "residence",
];

/// Names that mark short-stay or shared lodging rather than an apartment
const SHARED_LODGING: &[&str] = &["hotel", "resort", "pg", "hostel", "paying guest", "co-living"];

const SERVICE_APARTMENT: &[&str] = &["service apartment", "serviced apartment"];

const APARTMENT: &[Rule] = &[
    Rule::include().keywords(APARTMENT_KEYWORDS),
    Rule::include().types(&["lodging"]).unless(SHARED_LODGING),
    Rule::exclude()
        .keywords(SHARED_LODGING)
        .unless(&["apartment", "residential"]),
    // service apartments are counted as paying-guest accommodation
    Rule::exclude().keywords(SERVICE_APARTMENT),
];

const PAYING_GUEST: &[Rule] = &[
    Rule::include().keywords(&[
        "pg",
        "hostel",
        "co-living",
        "coliving",
        "paying guest",
        "service apartment",
    ]),
    Rule::include()
        .types(&["lodging"])
        .requiring(&["service", "apartment"])
        .unless(&["hotel", "resort"]),
    Rule::exclude()
        .keywords(&["hotel", "resort"])
        .unless(&["pg", "hostel", "service apartment", "paying guest"]),
    Rule::exclude()
        .keywords(&["apartment"])
        .unless(&["service", "pg", "hostel", "paying guest"]),
    Rule::include().keywords(SERVICE_APARTMENT),
];

const GYM: &[Rule] = &[
    Rule::include().types(&["gym"]),
    Rule::include().keywords(&[
        "gym",
        "fitness centre",
        "fitness center",
        "sports complex",
        "fitness",
        "workout",
        "health club",
        "athletic club",
        "training center",
        "training centre",
    ]),
];

const SALON: &[Rule] = &[
    Rule::include().types(&["beauty_salon", "hair_care", "spa", "hair_salon", "barber"]),
    Rule::include().keywords(&[
        "salon",
        "barber",
        "haircut",
        "spa",
        "beauty parlor",
        "beauty parlour",
        "hair care",
        "hair styling",
        "hair dresser",
        "hairdresser",
        "beauty center",
        "beauty centre",
    ]),
    // nail-only studios
    Rule::exclude()
        .keywords(&["nail"])
        .unless(&["salon", "hair", "barber", "beauty"]),
];

/// Rule table of a category
pub fn rule_set(category: Category) -> RuleSet {
    let rules = match category {
        Category::Eatery => EATERY,
        Category::Office => OFFICE,
        Category::Apartment => APARTMENT,
        Category::PayingGuest => PAYING_GUEST,
        Category::Gym => GYM,
        Category::Salon => SALON,
    };
    RuleSet { rules }
}
