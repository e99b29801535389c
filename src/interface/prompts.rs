use dialoguer::{Confirm, Input, Select};

use crate::catalog::Catalog;
use crate::error::{BasketError, Result};
use crate::models::{CatalogItem, RequestedLine, Substitution};

/// Prompt for the shopping budget.
pub fn prompt_budget() -> Result<i64> {
    let input: String = Input::new()
        .with_prompt("What is your budget?")
        .default("10000".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| BasketError::InvalidInput("Invalid number".to_string()))
}

/// Prompt for how many units of an item to buy.
pub fn prompt_quantity(item_name: &str) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt(format!("How many '{}'?", item_name))
        .default("1".to_string())
        .interact_text()?;

    let quantity: i64 = input
        .trim()
        .parse()
        .map_err(|_| BasketError::InvalidInput("Invalid number".to_string()))?;

    if quantity <= 0 {
        return Err(BasketError::InvalidInput(
            "Quantity must be at least 1".to_string(),
        ));
    }

    Ok(quantity)
}

/// Resolve free text to a catalog item: exact name, then fuzzy candidates.
fn resolve_item<'a>(catalog: &'a Catalog, input: &str) -> Result<Option<&'a CatalogItem>> {
    if let Some(item) = catalog.get(input).or_else(|| catalog.find_by_name(input)) {
        return Ok(Some(item));
    }

    let candidates = catalog.search(input);

    match candidates.as_slice() {
        [] => {
            println!("No matching product found for '{}'", input);
            Ok(None)
        }
        [(item, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", item.name))
                .default(true)
                .interact()?;
            Ok(confirm.then_some(*item))
        }
        _ => {
            let options: Vec<&CatalogItem> = candidates.iter().take(5).map(|(i, _)| *i).collect();

            let mut labels: Vec<String> = options
                .iter()
                .map(|i| format!("{} ({}, {})", i.name, i.category, i.price))
                .collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            Ok(options.get(selection).copied())
        }
    }
}

/// Build a shopping list interactively.
pub fn prompt_items(catalog: &Catalog) -> Result<Vec<RequestedLine>> {
    let mut lines = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a product name or id (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        let Some(item) = resolve_item(catalog, input)? else {
            continue;
        };

        match prompt_quantity(&item.name) {
            Ok(quantity) => {
                lines.push(RequestedLine::new(item.id.clone(), quantity));
                println!("Added: {} x{}", item.name, quantity);
            }
            Err(BasketError::InvalidInput(msg)) => println!("{}", msg),
            Err(e) => return Err(e),
        }
    }

    Ok(lines)
}

/// Let the user pick one substitution to apply, if any.
pub fn prompt_substitution(substitutions: &[Substitution]) -> Result<Option<&Substitution>> {
    if substitutions.is_empty() {
        return Ok(None);
    }

    let mut labels: Vec<String> = substitutions
        .iter()
        .map(|s| format!("{} -> {} ({})", s.from_name, s.to.name, s.to.price))
        .collect();
    labels.push("Keep the basket as is".to_string());

    let selection = Select::new()
        .with_prompt("Apply a substitution?")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;

    Ok(substitutions.get(selection))
}
