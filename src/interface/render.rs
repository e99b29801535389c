use crate::models::{Basket, CatalogItem, OptimizationResult};
use crate::optimizer::{average_eco_score, SustainabilityLevel};

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(10)
}

/// Display the basket lines in a formatted table.
pub fn display_basket(basket: &Basket) {
    if basket.is_empty() {
        println!("No items fit in the budget.");
        return;
    }

    let width = name_width(basket.lines.iter().map(|l| l.name.as_str()));

    for (i, line) in basket.lines.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} x{:<3} {:>8} | eco {:>3} social {:>3}  [{}]",
            i + 1,
            line.name,
            line.quantity,
            line.total_price,
            line.eco_score,
            line.social_score,
            line.category,
            width = width
        );
    }
}

/// Display a full optimization result.
pub fn display_result(result: &OptimizationResult) {
    println!();
    println!("=== Optimized Basket ({}) ===", result.basket.objective.label());
    println!();

    display_basket(&result.basket);

    let avg_eco = average_eco_score(&result.basket);
    let level = SustainabilityLevel::from_average(avg_eco);

    println!();
    println!("--- Summary ---");
    println!("Items: {} ({} units)", result.basket.len(), result.basket.total_units());
    println!("Total price: {}", result.basket.total_price);
    println!("Original total: {}", result.original_total);
    println!("Savings: {}", result.savings());
    println!("Sustainability: {:.3}", result.basket.sustainability);
    println!("Average eco score: {:.1} ({})", avg_eco, level.label());

    if result.front.len() > 1 {
        println!();
        println!("--- Pareto front ---");
        for basket in &result.front {
            println!(
                "  {:<15} price {:>8}  sustainability {:.3}  ({} items)",
                basket.objective.label(),
                basket.total_price,
                basket.sustainability,
                basket.len()
            );
        }
    }

    if !result.substitutions.is_empty() {
        println!();
        println!("--- Suggested substitutions ---");
        for (i, sub) in result.substitutions.iter().enumerate() {
            println!(
                "{:>3}. {} -> {} ({}, eco {} social {})",
                i + 1,
                sub.from_name,
                sub.to.name,
                sub.to.price,
                sub.to.eco_score,
                sub.to.social_score
            );
            println!("     {}", sub.reason);
        }
    }

    if !result.infeasible.is_empty() {
        println!();
        println!(
            "Over budget on their own: {}",
            result.infeasible.join(", ")
        );
    }

    println!();
}

/// Display a list of catalog items.
pub fn display_catalog(items: &[&CatalogItem], title: &str) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    let width = name_width(items.iter().map(|i| i.name.as_str()));
    for item in items {
        println!(
            "  {:>8}  {:<width$}  {:>7}  eco:{:>3} social:{:>3}  {}",
            item.id,
            item.name,
            item.price,
            item.eco_score,
            item.social_score,
            item.category,
            width = width
        );
    }

    println!();
}
