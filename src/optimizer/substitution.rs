use std::collections::HashSet;

use crate::config::SubstitutionPolicy;
use crate::models::{Basket, CatalogItem, EnrichedLine, RequestedLine, Substitution};
use crate::optimizer::constants::SUBSTITUTION_REASON;
use crate::optimizer::evaluator::line_utility;
use crate::optimizer::utility::{utility, UtilityParams};

#[inline]
fn item_utility(item: &CatalogItem, params: &UtilityParams) -> f64 {
    utility(item.eco_score as i64, item.social_score as i64, params)
}

/// Whether `candidate` may replace `line`: same category, no more expensive,
/// strictly more sustainable, and not already in the basket.
fn is_valid_alternative(
    line: &EnrichedLine,
    source_utility: f64,
    candidate: &CatalogItem,
    in_basket: &HashSet<&str>,
    params: &UtilityParams,
) -> bool {
    candidate.id != line.id
        && !in_basket.contains(candidate.id.as_str())
        && candidate.category == line.category
        && candidate.price <= line.unit_price
        && item_utility(candidate, params) > source_utility
}

/// Suggest at most one replacement per basket line, scanning the catalog in order.
pub fn find_substitutions(
    basket: &Basket,
    catalog: &[CatalogItem],
    policy: SubstitutionPolicy,
    params: &UtilityParams,
) -> Vec<Substitution> {
    let in_basket: HashSet<&str> = basket.lines.iter().map(|l| l.id.as_str()).collect();

    basket
        .lines
        .iter()
        .filter_map(|line| {
            let source_utility = line_utility(line, params);
            let mut candidates = catalog.iter().filter(|item| {
                is_valid_alternative(line, source_utility, item, &in_basket, params)
            });

            let target = match policy {
                SubstitutionPolicy::FirstMatch => candidates.next(),
                SubstitutionPolicy::BestMatch => candidates.fold(None, |best, item| match best {
                    None => Some(item),
                    Some(current) => {
                        if is_better_alternative(item, current, params) {
                            Some(item)
                        } else {
                            Some(current)
                        }
                    }
                }),
            }?;

            Some(Substitution {
                from_id: line.id.clone(),
                from_name: line.name.clone(),
                quantity: line.quantity,
                to: target.clone(),
                reason: SUBSTITUTION_REASON.to_string(),
            })
        })
        .collect()
}

/// Higher utility wins, then lower price; otherwise the earlier item stays.
fn is_better_alternative(
    item: &CatalogItem,
    current: &CatalogItem,
    params: &UtilityParams,
) -> bool {
    let u_item = item_utility(item, params);
    let u_current = item_utility(current, params);
    u_item > u_current || (u_item == u_current && item.price < current.price)
}

/// Swap the source id of a substitution for its target, keeping quantities.
///
/// The returned request must go through the whole pipeline again, since the
/// swap can change the basket's price and feasibility.
pub fn apply_substitution(
    request: &[RequestedLine],
    substitution: &Substitution,
) -> Vec<RequestedLine> {
    request
        .iter()
        .map(|line| {
            if line.id == substitution.from_id {
                RequestedLine::new(substitution.to.id.clone(), line.quantity)
            } else {
                line.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Objective};
    use crate::optimizer::evaluator::build_basket;

    fn item(id: &str, category: Category, price: u64, eco: i64, social: i64) -> CatalogItem {
        CatalogItem::new(id, format!("Item {id}"), category, price, eco, social)
    }

    fn basket_of(items: &[&CatalogItem]) -> Basket {
        let lines = items.iter().map(|i| EnrichedLine::new(i, 2)).collect();
        build_basket(Objective::Sustainability, lines, &UtilityParams::default())
    }

    fn suggest(
        items: &[&CatalogItem],
        catalog: &[CatalogItem],
        policy: SubstitutionPolicy,
    ) -> Vec<Substitution> {
        find_substitutions(&basket_of(items), catalog, policy, &UtilityParams::default())
    }

    #[test]
    fn test_first_match_in_catalog_order() {
        let milk = item("1", Category::Dairy, 1000, 40, 40);
        let catalog = vec![
            milk.clone(),
            item("2", Category::Dairy, 900, 60, 60),
            item("3", Category::Dairy, 800, 90, 90),
        ];

        let subs = suggest(&[&milk], &catalog, SubstitutionPolicy::FirstMatch);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].from_id, "1");
        assert_eq!(subs[0].to.id, "2");
        assert_eq!(subs[0].quantity, 2);
        assert_eq!(subs[0].reason, SUBSTITUTION_REASON);
    }

    #[test]
    fn test_best_match_picks_highest_utility() {
        let milk = item("1", Category::Dairy, 1000, 40, 40);
        let catalog = vec![
            milk.clone(),
            item("2", Category::Dairy, 900, 60, 60),
            item("3", Category::Dairy, 950, 90, 90),
            item("4", Category::Dairy, 800, 90, 90),
        ];

        let subs = suggest(&[&milk], &catalog, SubstitutionPolicy::BestMatch);
        assert_eq!(subs[0].to.id, "4");
    }

    #[test]
    fn test_rejects_other_category_pricier_or_worse() {
        let bread = item("1", Category::Bakery, 1000, 50, 50);
        let catalog = vec![
            bread.clone(),
            item("2", Category::Dairy, 500, 90, 90),
            item("3", Category::Bakery, 1001, 90, 90),
            item("4", Category::Bakery, 500, 50, 50),
            item("5", Category::Bakery, 500, 40, 60),
        ];

        let subs = suggest(&[&bread], &catalog, SubstitutionPolicy::FirstMatch);
        // Item 5 has lower utility than (50, 50) under eco-leaning weights.
        assert!(subs.is_empty());
    }

    #[test]
    fn test_equal_price_allowed() {
        let bread = item("1", Category::Bakery, 1000, 50, 50);
        let catalog = vec![bread.clone(), item("2", Category::Bakery, 1000, 51, 50)];

        let subs = suggest(&[&bread], &catalog, SubstitutionPolicy::FirstMatch);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].to.id, "2");
    }

    #[test]
    fn test_skips_items_already_in_basket() {
        let a = item("a", Category::Snacks, 1000, 30, 30);
        let b = item("b", Category::Snacks, 900, 80, 80);
        let catalog = vec![a.clone(), b.clone()];

        let subs = suggest(&[&a, &b], &catalog, SubstitutionPolicy::FirstMatch);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_empty_basket_has_no_substitutions() {
        let catalog = vec![item("a", Category::Snacks, 10, 90, 90)];
        let subs = suggest(&[], &catalog, SubstitutionPolicy::FirstMatch);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_apply_substitution_keeps_quantity() {
        let milk = item("1", Category::Dairy, 1000, 40, 40);
        let catalog = vec![milk.clone(), item("2", Category::Dairy, 900, 60, 60)];
        let subs = suggest(&[&milk], &catalog, SubstitutionPolicy::FirstMatch);

        let request = vec![RequestedLine::new("1", 3), RequestedLine::new("9", 1)];
        let updated = apply_substitution(&request, &subs[0]);
        assert_eq!(updated, vec![RequestedLine::new("2", 3), RequestedLine::new("9", 1)]);
    }
}
