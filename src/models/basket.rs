use serde::{Deserialize, Serialize};

use crate::models::item::{string_or_number, CatalogItem, Category};

/// One line of a shopping request: a catalog id and a quantity.
///
/// The quantity is signed so that malformed requests can be rejected with a
/// typed error instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedLine {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub quantity: i64,
}

impl RequestedLine {
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// A full shopping request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingRequest {
    pub budget: i64,
    pub items: Vec<RequestedLine>,
}

/// A requested line joined with its catalog price and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLine {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub unit_price: u64,
    pub quantity: u32,
    pub total_price: u64,
    pub eco_score: u8,
    pub social_score: u8,
}

impl EnrichedLine {
    pub fn new(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category,
            unit_price: item.price,
            quantity,
            total_price: item.price.saturating_mul(quantity as u64),
            eco_score: item.eco_score,
            social_score: item.social_score,
        }
    }
}

/// The objective a basket was selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Maximize summed utility × quantity.
    Sustainability,
    /// Minimize total spend.
    Price,
}

impl Objective {
    pub const ALL: [Objective; 2] = [Objective::Sustainability, Objective::Price];

    pub fn label(&self) -> &'static str {
        match self {
            Objective::Sustainability => "sustainability",
            Objective::Price => "price",
        }
    }
}

/// Lines chosen for one objective run, with their aggregates.
///
/// Built by the basket evaluator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub objective: Objective,
    pub lines: Vec<EnrichedLine>,
    pub total_price: u64,
    pub sustainability: f64,
}

impl Basket {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lines.iter().any(|l| l.id == id)
    }

    /// Total units across all lines.
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }
}

/// A suggested replacement for one chosen line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub from_id: String,
    pub from_name: String,
    /// Quantity of the replaced line, kept when the swap is applied.
    pub quantity: u32,
    pub to: CatalogItem,
    pub reason: String,
}

/// Everything the engine returns for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Basket picked from the Pareto front.
    pub basket: Basket,
    /// Non-dominated baskets, in objective order.
    pub front: Vec<Basket>,
    /// Price of the full request before optimization.
    pub original_total: u64,
    pub substitutions: Vec<Substitution>,
    /// Ids whose own line total exceeds the budget.
    pub infeasible: Vec<String>,
}

impl OptimizationResult {
    /// Money saved compared to buying the whole request.
    pub fn savings(&self) -> u64 {
        self.original_total.saturating_sub(self.basket.total_price)
    }
}
