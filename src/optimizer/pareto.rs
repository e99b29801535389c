use tracing::debug;

use crate::models::{Basket, EnrichedLine, Objective};
use crate::optimizer::evaluator::{build_basket, line_value};
use crate::optimizer::selector::{select, Candidate};
use crate::optimizer::utility::UtilityParams;

/// Returns true if basket `a` dominates basket `b`.
///
/// `a` dominates `b` when it is no more expensive, at least as sustainable,
/// and strictly better on one of the two.
pub fn dominates(a: &Basket, b: &Basket) -> bool {
    let no_worse = a.total_price <= b.total_price && a.sustainability >= b.sustainability;
    let strictly_better = a.total_price < b.total_price || a.sustainability > b.sustainability;
    no_worse && strictly_better
}

/// Keep only non-dominated baskets, preserving their input order.
pub fn pareto_front(baskets: Vec<Basket>) -> Vec<Basket> {
    let mut front: Vec<Basket> = Vec::new();

    for candidate in baskets {
        if front.iter().any(|member| dominates(member, &candidate)) {
            continue;
        }
        front.retain(|member| !dominates(&candidate, member));
        front.push(candidate);
    }

    front
}

/// Pick the most sustainable basket; ties go to the cheaper, then the earlier one.
pub fn select_preferred(front: &[Basket]) -> Option<&Basket> {
    let mut best: Option<&Basket> = None;
    for basket in front {
        best = match best {
            None => Some(basket),
            Some(current) => {
                let better = basket.sustainability > current.sustainability
                    || (basket.sustainability == current.sustainability
                        && basket.total_price < current.total_price);
                if better { Some(basket) } else { Some(current) }
            }
        };
    }
    best
}

/// Run the selector for one objective and evaluate the chosen lines.
pub fn solve_objective(
    lines: &[EnrichedLine],
    budget: usize,
    objective: Objective,
    params: &UtilityParams,
) -> Basket {
    let candidates: Vec<Candidate> = lines
        .iter()
        .map(|line| Candidate::new(line.total_price, line_value(line, objective, params)))
        .collect();

    let chosen: Vec<EnrichedLine> = select(&candidates, budget)
        .into_iter()
        .map(|i| lines[i].clone())
        .collect();

    build_basket(objective, chosen, params)
}

/// Solve once per objective and reduce the results to their Pareto front.
///
/// Returns the front (in objective order) and the basket handed to the caller.
pub fn search(
    lines: &[EnrichedLine],
    budget: usize,
    params: &UtilityParams,
) -> (Vec<Basket>, Basket) {
    let baskets: Vec<Basket> = Objective::ALL
        .iter()
        .map(|&objective| {
            let basket = solve_objective(lines, budget, objective, params);
            debug!(
                objective = objective.label(),
                lines = basket.len(),
                total_price = basket.total_price,
                sustainability = basket.sustainability,
                "objective solved"
            );
            basket
        })
        .collect();

    let front = pareto_front(baskets);
    debug!(front_size = front.len(), "pareto front computed");

    // The front of a non-empty input is never empty.
    let chosen = select_preferred(&front)
        .cloned()
        .unwrap_or_else(|| build_basket(Objective::Sustainability, Vec::new(), params));

    (front, chosen)
}
