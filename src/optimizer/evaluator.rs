use serde::{Deserialize, Serialize};

use crate::models::{Basket, EnrichedLine, Objective};
use crate::optimizer::constants::{
    HIGH_SUSTAINABILITY_THRESHOLD, MAX_SCORE, MEDIUM_SUSTAINABILITY_THRESHOLD,
};
use crate::optimizer::utility::{utility, UtilityParams};

/// Aggregate metrics of a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketMetrics {
    pub total_price: u64,
    pub sustainability: f64,
}

/// Utility of one unit of a line.
#[inline]
pub fn line_utility(line: &EnrichedLine, params: &UtilityParams) -> f64 {
    utility(line.eco_score as i64, line.social_score as i64, params)
}

/// Objective value of a whole line, as fed to the selector.
///
/// Price is negated so that maximizing it minimizes spend.
pub fn line_value(line: &EnrichedLine, objective: Objective, params: &UtilityParams) -> f64 {
    match objective {
        Objective::Sustainability => line_utility(line, params) * line.quantity as f64,
        Objective::Price => -(line.total_price as f64),
    }
}

/// Sum price and sustainability over the lines.
pub fn evaluate(lines: &[EnrichedLine], params: &UtilityParams) -> BasketMetrics {
    lines.iter().fold(BasketMetrics::default(), |acc, line| BasketMetrics {
        total_price: acc.total_price.saturating_add(line.total_price),
        sustainability: acc.sustainability + line_utility(line, params) * line.quantity as f64,
    })
}

/// Build an immutable basket with its aggregates.
pub fn build_basket(
    objective: Objective,
    lines: Vec<EnrichedLine>,
    params: &UtilityParams,
) -> Basket {
    let metrics = evaluate(&lines, params);
    Basket {
        objective,
        lines,
        total_price: metrics.total_price,
        sustainability: metrics.sustainability,
    }
}

/// Coarse rating of a basket's average eco score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityLevel {
    High,
    Medium,
    Low,
}

impl SustainabilityLevel {
    pub fn from_average(avg_eco: f64) -> Self {
        if avg_eco >= HIGH_SUSTAINABILITY_THRESHOLD {
            SustainabilityLevel::High
        } else if avg_eco >= MEDIUM_SUSTAINABILITY_THRESHOLD {
            SustainabilityLevel::Medium
        } else {
            SustainabilityLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SustainabilityLevel::High => "High",
            SustainabilityLevel::Medium => "Medium",
            SustainabilityLevel::Low => "Low",
        }
    }
}

/// Quantity-weighted average eco score, clamped to [0, 100]. Empty baskets score 0.
pub fn average_eco_score(basket: &Basket) -> f64 {
    let units = basket.total_units();
    if units == 0 {
        return 0.0;
    }

    let weighted: f64 = basket
        .lines
        .iter()
        .map(|l| l.eco_score as f64 * l.quantity as f64)
        .sum();

    (weighted / units as f64).clamp(0.0, MAX_SCORE as f64)
}
