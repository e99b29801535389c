use tracing::debug;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{BasketError, Result};
use crate::models::{CatalogItem, EnrichedLine, OptimizationResult, RequestedLine};
use crate::optimizer::constants::MAX_DP_CELLS;
use crate::optimizer::evaluator::evaluate;
use crate::optimizer::pareto::search;
use crate::optimizer::substitution::find_substitutions;
use crate::optimizer::utility::UtilityParams;

/// Check the budget against the configured DP ceiling.
pub fn validate_budget(budget: i64, config: &EngineConfig) -> Result<usize> {
    let invalid = || BasketError::InvalidBudget {
        budget,
        max: config.max_budget,
    };

    if budget < 0 || (budget == 0 && config.reject_zero_budget) {
        return Err(invalid());
    }
    if budget as u64 > config.max_budget {
        return Err(invalid());
    }
    usize::try_from(budget).map_err(|_| invalid())
}

/// Join requested lines with the catalog.
///
/// Rejects zero or negative quantities and unknown ids. If no id resolves at
/// all the request is an `EmptySelection`.
pub fn enrich_request(
    request: &[RequestedLine],
    catalog: &Catalog,
) -> Result<Vec<EnrichedLine>> {
    if request.is_empty() {
        return Err(BasketError::EmptySelection);
    }

    if request.iter().all(|line| catalog.get(&line.id).is_none()) {
        return Err(BasketError::EmptySelection);
    }

    request
        .iter()
        .map(|line| {
            let item = catalog
                .get(&line.id)
                .ok_or_else(|| BasketError::UnknownItem(line.id.clone()))?;
            let quantity = u32::try_from(line.quantity)
                .ok()
                .filter(|&q| q > 0)
                .ok_or_else(|| BasketError::InvalidQuantity {
                    id: line.id.clone(),
                    quantity: line.quantity,
                })?;
            Ok(EnrichedLine::new(item, quantity))
        })
        .collect()
}

/// Optimize a request against the catalog.
///
/// Validates everything up front, then runs the same pipeline as [`optimize_lines`].
pub fn optimize(
    request: &[RequestedLine],
    budget: i64,
    catalog: &Catalog,
    config: &EngineConfig,
) -> Result<OptimizationResult> {
    let budget = validate_budget(budget, config)?;
    let lines = enrich_request(request, catalog)?;
    run_pipeline(&lines, budget, catalog.items(), config)
}

/// Optimize lines that are already joined with their catalog data.
///
/// `catalog` is the full product list searched for substitutions.
pub fn optimize_lines(
    lines: &[EnrichedLine],
    budget: i64,
    catalog: &[CatalogItem],
    config: &EngineConfig,
) -> Result<OptimizationResult> {
    let budget = validate_budget(budget, config)?;
    if lines.is_empty() {
        return Err(BasketError::EmptySelection);
    }
    if let Some(line) = lines.iter().find(|l| l.quantity == 0) {
        return Err(BasketError::InvalidQuantity {
            id: line.id.clone(),
            quantity: 0,
        });
    }
    run_pipeline(lines, budget, catalog, config)
}

/// Size of the selection table for `rows` lines, or `None` past `MAX_DP_CELLS`.
///
/// Columns beyond the full request price are never needed.
fn table_cells(rows: usize, budget: usize, original_total: u64) -> Option<usize> {
    let span = budget.min(usize::try_from(original_total).unwrap_or(usize::MAX));
    rows.checked_mul(span.checked_add(1)?)
        .filter(|&cells| cells <= MAX_DP_CELLS)
}

fn run_pipeline(
    lines: &[EnrichedLine],
    budget: usize,
    catalog: &[CatalogItem],
    config: &EngineConfig,
) -> Result<OptimizationResult> {
    if lines.len() > config.max_items {
        return Err(BasketError::TooManyItems {
            count: lines.len(),
            max: config.max_items,
        });
    }

    let params = UtilityParams::from(config);
    let original_total = evaluate(lines, &params).total_price;

    let infeasible: Vec<String> = lines
        .iter()
        .filter(|l| l.total_price > budget as u64)
        .map(|l| l.id.clone())
        .collect();
    if !infeasible.is_empty() {
        debug!(count = infeasible.len(), "lines priced above the budget");
    }

    let cells = table_cells(lines.len(), budget, original_total).ok_or_else(|| {
        BasketError::InvalidBudget {
            budget: i64::try_from(budget).unwrap_or(i64::MAX),
            max: (MAX_DP_CELLS / lines.len()).saturating_sub(1) as u64,
        }
    })?;
    debug!(lines = lines.len(), budget, cells, "running selection");
    let (front, basket) = search(lines, budget, &params);

    let substitutions = find_substitutions(&basket, catalog, config.substitution_policy, &params);
    debug!(count = substitutions.len(), "substitutions found");

    Ok(OptimizationResult {
        basket,
        front,
        original_total,
        substitutions,
        infeasible,
    })
}
