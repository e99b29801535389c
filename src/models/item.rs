use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::optimizer::constants::{MAX_SCORE, MIN_SCORE};

/// Closed set of product categories used for same-type substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Dairy,
    Bakery,
    Snacks,
    Beverages,
    Cereals,
    Grains,
    Legumes,
    Canned,
    Oils,
    Meat,
    Seafood,
    Produce,
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Dairy,
        Category::Bakery,
        Category::Snacks,
        Category::Beverages,
        Category::Cereals,
        Category::Grains,
        Category::Legumes,
        Category::Canned,
        Category::Oils,
        Category::Meat,
        Category::Seafood,
        Category::Produce,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dairy => "dairy",
            Category::Bakery => "bakery",
            Category::Snacks => "snacks",
            Category::Beverages => "beverages",
            Category::Cereals => "cereals",
            Category::Grains => "grains",
            Category::Legumes => "legumes",
            Category::Canned => "canned",
            Category::Oils => "oils",
            Category::Meat => "meat",
            Category::Seafood => "seafood",
            Category::Produce => "produce",
            Category::Other => "other",
        }
    }
}

/// Unknown names fall back to `Other`.
impl From<String> for Category {
    fn from(value: String) -> Self {
        let value = value.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog with its price and sustainability sub-scores.
///
/// Scores are clamped to [0, 100] on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub name: String,

    #[serde(default = "default_category")]
    pub category: Category,

    /// Unit price in the smallest currency unit.
    pub price: u64,

    #[serde(deserialize_with = "clamped_score")]
    pub eco_score: u8,

    #[serde(deserialize_with = "clamped_score")]
    pub social_score: u8,
}

/// Ids are opaque strings, but numeric ids from upstream stores are accepted.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    })
}

fn default_category() -> Category {
    Category::Other
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

fn clamped_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_score(raw.round() as i64))
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price: u64,
        eco_score: i64,
        social_score: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            price,
            eco_score: clamp_score(eco_score),
            social_score: clamp_score(social_score),
        }
    }

    /// A catalog item must have an id and a positive price.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && self.price > 0
    }
}
