//! Static recommendation text keyed by primary category.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{Category, PerCategory};

/// Diet, lifestyle and herbal guidance for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub diet: String,
    pub lifestyle: String,
    pub herb_support: String,
}

struct Entry {
    diet: &'static str,
    lifestyle: &'static str,
    herb_support: &'static str,
}

static TABLE: PerCategory<Entry> = PerCategory {
    vata: Entry {
        diet: "Warm, cooked foods; sweet, sour, salty tastes; regular meal times",
        lifestyle: "Regular routine, adequate rest, gentle exercise like yoga",
        herb_support: "Ashwagandha, Brahmi, Jatamansi for calming and grounding",
    },
    pitta: Entry {
        diet: "Cool, fresh foods; sweet, bitter, astringent tastes; avoid spicy foods",
        lifestyle: "Moderate exercise, avoid overheating, practice meditation",
        herb_support: "Amalaki, Neem, Shatavari for cooling and balancing",
    },
    kapha: Entry {
        diet: "Light, warm foods; pungent, bitter, astringent tastes; avoid heavy foods",
        lifestyle: "Regular vigorous exercise, stay active, avoid oversleeping",
        herb_support: "Trikatu, Guggulu, Punarnava for stimulation and detox",
    },
};

/// The recommendation for a category.
pub fn recommendation_for(category: Category) -> Recommendation {
    let entry = TABLE.get(category);
    Recommendation {
        diet: entry.diet.to_string(),
        lifestyle: entry.lifestyle.to_string(),
        herb_support: entry.herb_support.to_string(),
    }
}

/// The recommendation for a category name received from outside the crate.
pub fn recommendation_for_name(name: &str) -> Result<Recommendation, ScoringError> {
    let category: Category = name.parse()?;
    Ok(recommendation_for(category))
}
