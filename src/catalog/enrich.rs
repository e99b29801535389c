//! Turns raw Open Food Facts search results into catalog items.
//!
//! Upstream records carry no price and no sustainability scores, so both are
//! estimated from category tags, labels and origin. Prices come from a seeded
//! RNG so an import is reproducible.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::models::{CatalogItem, Category};

/// Upper bound on products taken from one import.
pub const MAX_IMPORTED_PRODUCTS: usize = 2000;

const ECO_SCORE_RANGE: (i64, i64) = (20, 95);
const SOCIAL_SCORE_RANGE: (i64, i64) = (30, 95);
const BASE_SCORE: i64 = 50;

/// Category keyword rules, checked in order against the joined tags.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Dairy, &["milk", "dairy", "cheese", "yogurt"]),
    (Category::Bakery, &["bread", "bakery", "toast"]),
    (
        Category::Snacks,
        &["biscuits", "cookies", "chocolate", "snack", "sweets", "candy"],
    ),
    (
        Category::Beverages,
        &["beverage", "drinks", "water", "juice", "soda"],
    ),
    (Category::Cereals, &["cereal", "breakfast"]),
    (Category::Grains, &["rice", "grains"]),
    (Category::Legumes, &["legume", "lentils", "beans", "chickpeas"]),
    (Category::Canned, &["canned", "preserved"]),
    (Category::Oils, &["oil", "fat"]),
    (Category::Meat, &["meat", "beef", "chicken", "pork"]),
    (Category::Seafood, &["fish", "seafood"]),
    (Category::Produce, &["fruit", "vegetable", "veggie"]),
];

/// Price bands (inclusive) keyed by tag keywords; first hit wins.
const PRICE_BANDS: &[(&[&str], u64, u64)] = &[
    (&["milk", "dairy"], 700, 1200),
    (&["bread"], 800, 1200),
    (&["water", "beverage"], 500, 1000),
    (&["rice", "cereal"], 900, 1500),
    (&["legume"], 800, 1200),
    (&["oil"], 1800, 3000),
    (&["chocolate", "snack"], 900, 2500),
];
const DEFAULT_PRICE_BAND: (u64, u64) = (800, 1500);

const ECO_TAG_ADJUSTMENTS: &[(&str, i64)] = &[
    ("legumes", 30),
    ("fruits", 25),
    ("vegetables", 25),
    ("water", 20),
    ("whole", 15),
    ("chocolate", -20),
    ("snacks", -20),
    ("ultra", -25),
];

/// One product from an Open Food Facts search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub code: Option<String>,
    pub product_name: Option<String>,
    pub product_name_es: Option<String>,
    pub product_name_en: Option<String>,
    pub categories_tags: Vec<String>,
    pub labels_tags: Vec<String>,
    pub countries_tags: Vec<String>,
    pub nova_groups_tags: Vec<String>,
    pub ecoscore_grade: Option<String>,
    pub lang: Option<String>,
}

impl RawProduct {
    /// Localized name, preferring Spanish, then English, then the default.
    ///
    /// Products without a default name are never imported.
    pub fn display_name(&self) -> Option<&str> {
        let base = non_empty(self.product_name.as_deref())?;
        Some(
            non_empty(self.product_name_es.as_deref())
                .or(non_empty(self.product_name_en.as_deref()))
                .unwrap_or(base),
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<RawProduct>,
}

fn any_tag_contains(tags: &[String], keyword: &str) -> bool {
    tags.iter().any(|t| t.contains(keyword))
}

/// Combining diacritical marks left behind by canonical decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercase, strip accents, drop everything outside `[a-z0-9 ]`, trim.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    folded.trim().to_string()
}

/// Map category tags to a main category.
pub fn main_category(tags: &[String]) -> Category {
    let joined = tags.join(" ").to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| joined.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

pub fn estimate_eco_score(product: &RawProduct) -> i64 {
    let mut score = BASE_SCORE;
    for (keyword, delta) in ECO_TAG_ADJUSTMENTS {
        if any_tag_contains(&product.categories_tags, keyword) {
            score += delta;
        }
    }

    score += match product.ecoscore_grade.as_deref() {
        Some("a") => 10,
        Some("b") => 5,
        Some("d") => -10,
        Some("e") => -20,
        _ => 0,
    };

    score.clamp(ECO_SCORE_RANGE.0, ECO_SCORE_RANGE.1)
}

pub fn estimate_social_score(product: &RawProduct) -> i64 {
    let mut score = BASE_SCORE;

    // Local origin counts double.
    if product.countries_tags.iter().any(|c| c == "en:chile") {
        score += 20;
    } else if !product.countries_tags.is_empty() {
        score += 10;
    }

    if any_tag_contains(&product.labels_tags, "fair-trade") {
        score += 20;
    }
    if any_tag_contains(&product.labels_tags, "organic") {
        score += 10;
    }
    if any_tag_contains(&product.labels_tags, "local") {
        score += 10;
    }

    if product.nova_groups_tags.iter().any(|n| n == "en:nova-group-4") {
        score -= 20;
    }
    if product.nova_groups_tags.iter().any(|n| n == "en:nova-group-1") {
        score += 10;
    }

    if product.lang.as_deref() == Some("es") {
        score += 5;
    }

    score.clamp(SOCIAL_SCORE_RANGE.0, SOCIAL_SCORE_RANGE.1)
}

/// Draw a plausible shelf price from the band matching the product's tags.
pub fn estimate_price<R: Rng>(product: &RawProduct, rng: &mut R) -> u64 {
    let (low, high) = PRICE_BANDS
        .iter()
        .find(|(keywords, _, _)| {
            keywords
                .iter()
                .any(|k| any_tag_contains(&product.categories_tags, k))
        })
        .map(|(_, low, high)| (*low, *high))
        .unwrap_or(DEFAULT_PRICE_BAND);

    rng.gen_range(low..=high)
}

/// First free id among `preferred`, then `position`, `position-2`, `position-3`, ...
fn unique_id(preferred: Option<&str>, position: usize, used: &HashSet<String>) -> String {
    if let Some(code) = preferred {
        if !used.contains(code) {
            return code.to_string();
        }
    }

    let base = position.to_string();
    if !used.contains(&base) {
        return base;
    }
    (2..)
        .map(|suffix| format!("{position}-{suffix}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or(base)
}

/// Convert raw products into catalog items.
///
/// Skips unnamed products and duplicates by normalized name, keeping the
/// first occurrence, and stops after `limit` items. Ids are the product
/// barcode when present, otherwise the 1-based position in the output;
/// every returned id is unique.
pub fn import_products(raw: &[RawProduct], seed: u64, limit: usize) -> Vec<CatalogItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::new();
    let mut used_ids = HashSet::new();
    let mut items = Vec::new();

    for product in raw {
        if items.len() >= limit {
            break;
        }
        let Some(name) = product.display_name() else {
            continue;
        };
        let normalized = normalize_name(name);
        if normalized.is_empty() || !seen.insert(normalized) {
            continue;
        }

        let code = non_empty(product.code.as_deref()).map(str::trim);
        let id = unique_id(code, items.len() + 1, &used_ids);
        if let Some(code) = code.filter(|c| *c != id) {
            warn!(code, id = %id, name, "duplicate product id reassigned");
        }
        used_ids.insert(id.clone());

        items.push(CatalogItem::new(
            id,
            name.trim(),
            main_category(&product.categories_tags),
            estimate_price(product, &mut rng),
            estimate_eco_score(product),
            estimate_social_score(product),
        ));
    }

    debug!(
        raw = raw.len(),
        imported = items.len(),
        "open food facts products converted"
    );
    items
}

/// Read an Open Food Facts search response (`{"products": [...]}`) from disk.
pub fn read_raw_products<P: AsRef<Path>>(path: P) -> Result<Vec<RawProduct>> {
    let content = fs::read_to_string(path.as_ref())?;
    let response: SearchResponse = serde_json::from_str(&content)?;
    info!(
        products = response.products.len(),
        path = %path.as_ref().display(),
        "raw products read"
    );
    Ok(response.products)
}
