#[macro_use]
extern crate assert_float_eq;

use eco_basket_rs::catalog::Catalog;
use eco_basket_rs::config::{EngineConfig, SubstitutionPolicy};
use eco_basket_rs::error::BasketError;
use eco_basket_rs::models::{CatalogItem, Category, Objective, RequestedLine};
use eco_basket_rs::optimizer::{
    apply_substitution, dominates, optimize, utility, UtilityParams,
};

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogItem::new("A", "Apples", Category::Produce, 1000, 80, 60),
        CatalogItem::new("B", "Bananas", Category::Produce, 1000, 40, 40),
        CatalogItem::new("C", "Chickpeas", Category::Legumes, 500, 90, 90),
        CatalogItem::new("D", "Dried beans", Category::Legumes, 450, 95, 90),
        CatalogItem::new("E", "Pears", Category::Produce, 900, 85, 70),
    ])
}

fn request(ids: &[&str]) -> Vec<RequestedLine> {
    ids.iter().map(|id| RequestedLine::new(*id, 1)).collect()
}

#[test]
fn test_picks_most_sustainable_subset_within_budget() {
    let catalog = sample_catalog();
    let result = optimize(
        &request(&["A", "B", "C"]),
        1500,
        &catalog,
        &EngineConfig::default(),
    )
    .unwrap();

    let ids: Vec<&str> = result.basket.lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(result.basket.total_price, 1500);
    assert_eq!(result.basket.objective, Objective::Sustainability);
    assert_eq!(result.original_total, 2500);
    assert_eq!(result.savings(), 1000);

    let params = UtilityParams::default();
    let expected = utility(80, 60, &params) + utility(90, 90, &params);
    assert_float_absolute_eq!(result.basket.sustainability, expected, 1e-9);
}

#[test]
fn test_front_holds_sustainable_and_cheapest_baskets() {
    let catalog = sample_catalog();
    let result = optimize(
        &request(&["A", "B", "C"]),
        1500,
        &catalog,
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(result.front.len(), 2);
    assert_eq!(result.front[0].objective, Objective::Sustainability);
    assert_eq!(result.front[1].objective, Objective::Price);
    assert!(result.front[1].is_empty());

    for a in &result.front {
        for b in &result.front {
            assert!(!dominates(a, b));
        }
    }
}

#[test]
fn test_zero_budget_returns_empty_basket() {
    let catalog = sample_catalog();
    let result = optimize(&request(&["A", "B", "C"]), 0, &catalog, &EngineConfig::default())
        .unwrap();

    assert!(result.basket.is_empty());
    assert_eq!(result.basket.total_price, 0);
    assert_eq!(result.original_total, 2500);
    assert!(result.substitutions.is_empty());
    assert_eq!(result.infeasible.len(), 3);
}

#[test]
fn test_rejected_requests() {
    let catalog = sample_catalog();
    let config = EngineConfig::default();

    let err = optimize(&request(&["A", "nope"]), 1500, &catalog, &config).unwrap_err();
    assert!(matches!(err, BasketError::UnknownItem(ref id) if id == "nope"));
    assert!(err.is_rejected_request());

    let err = optimize(&request(&["nope"]), 1500, &catalog, &config).unwrap_err();
    assert!(matches!(err, BasketError::EmptySelection));

    let err = optimize(&request(&["A"]), -5, &catalog, &config).unwrap_err();
    assert!(matches!(err, BasketError::InvalidBudget { budget: -5, .. }));

    let err = optimize(&[RequestedLine::new("A", 0)], 1500, &catalog, &config).unwrap_err();
    assert!(matches!(err, BasketError::InvalidQuantity { .. }));
}

#[test]
fn test_optimize_is_idempotent() {
    let catalog = sample_catalog();
    let config = EngineConfig::default();
    let lines = request(&["A", "B", "C", "E"]);

    let first = optimize(&lines, 2400, &catalog, &config).unwrap();
    let second = optimize(&lines, 2400, &catalog, &config).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_basket_is_subset_of_request_within_budget() {
    let catalog = sample_catalog();
    let lines = vec![
        RequestedLine::new("A", 2),
        RequestedLine::new("B", 1),
        RequestedLine::new("C", 3),
        RequestedLine::new("E", 1),
    ];

    for budget in [0, 450, 999, 1500, 2400, 5000] {
        let result = optimize(&lines, budget, &catalog, &EngineConfig::default()).unwrap();
        assert!(result.basket.total_price <= budget as u64);
        for line in &result.basket.lines {
            let requested = lines.iter().find(|r| r.id == line.id).unwrap();
            assert_eq!(line.quantity as i64, requested.quantity);
        }
    }
}

#[test]
fn test_substitutions_are_valid_alternatives() {
    let catalog = sample_catalog();
    let params = UtilityParams::default();

    for policy in [SubstitutionPolicy::FirstMatch, SubstitutionPolicy::BestMatch] {
        let config = EngineConfig {
            substitution_policy: policy,
            ..Default::default()
        };
        let result = optimize(&request(&["A", "B", "C"]), 2500, &catalog, &config).unwrap();

        assert!(!result.substitutions.is_empty());
        for sub in &result.substitutions {
            let from = catalog.get(&sub.from_id).unwrap();
            assert_eq!(sub.to.category, from.category);
            assert!(sub.to.price <= from.price);
            assert!(
                utility(sub.to.eco_score as i64, sub.to.social_score as i64, &params)
                    > utility(from.eco_score as i64, from.social_score as i64, &params)
            );
            assert!(!result.basket.contains(&sub.to.id));
        }
    }
}

#[test]
fn test_first_and_best_match_differ() {
    let catalog = sample_catalog();
    let lines = request(&["B"]);

    let first = optimize(&lines, 2000, &catalog, &EngineConfig::default()).unwrap();
    let best = optimize(
        &lines,
        2000,
        &catalog,
        &EngineConfig {
            substitution_policy: SubstitutionPolicy::BestMatch,
            ..Default::default()
        },
    )
    .unwrap();

    // Apples come first in the catalog; pears score higher and cost less.
    assert_eq!(first.substitutions[0].to.id, "A");
    assert_eq!(best.substitutions[0].to.id, "E");
}

#[test]
fn test_applying_a_substitution_improves_sustainability() {
    let catalog = sample_catalog();
    let config = EngineConfig::default();
    let lines = request(&["B", "C"]);

    let before = optimize(&lines, 2000, &catalog, &config).unwrap();
    let sub = &before.substitutions[0];
    assert_eq!(sub.from_id, "B");

    let swapped = apply_substitution(&lines, sub);
    let after = optimize(&swapped, 2000, &catalog, &config).unwrap();

    assert!(after.basket.sustainability > before.basket.sustainability);
    assert!(after.basket.total_price <= before.basket.total_price);
}
