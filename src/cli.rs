use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::MAX_IMPORTED_PRODUCTS;
use crate::config::SubstitutionPolicy;
use crate::models::{Category, RequestedLine};

/// EcoBasket: builds the most sustainable grocery basket that fits a budget.
#[derive(Parser, Debug)]
#[command(name = "eco_basket")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the product catalog (JSON or CSV).
    #[arg(short, long, default_value = "catalog.json", global = true)]
    pub catalog: PathBuf,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the largest budget accepted in one run.
    #[arg(long, global = true)]
    pub max_budget: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize a shopping list against a budget.
    Optimize {
        /// Request file with budget and items.
        #[arg(short, long, conflicts_with_all = ["budget", "item"])]
        request: Option<PathBuf>,

        /// Budget in the smallest currency unit.
        #[arg(short, long, allow_negative_numbers = true)]
        budget: Option<i64>,

        /// Requested item as `id:quantity` (quantity defaults to 1). Repeatable.
        #[arg(short, long = "item", value_parser = parse_item_arg)]
        item: Vec<RequestedLine>,

        /// Substitution policy (first_match or best_match).
        #[arg(long)]
        policy: Option<SubstitutionPolicy>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the chosen basket to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Build a basket interactively.
    Shop {
        /// Substitution policy (first_match or best_match).
        #[arg(long)]
        policy: Option<SubstitutionPolicy>,
    },

    /// List the catalog.
    Catalog {
        /// Only show one category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Convert an Open Food Facts search dump into a catalog file.
    Import {
        /// Raw search response (`{"products": [...]}`).
        #[arg(short, long)]
        source: PathBuf,

        /// Seed for the price estimates.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Maximum number of products to keep.
        #[arg(long, default_value_t = MAX_IMPORTED_PRODUCTS)]
        limit: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Shop { policy: None }
    }
}

/// Parse `id:quantity` or a bare `id`.
pub fn parse_item_arg(value: &str) -> Result<RequestedLine, String> {
    let (id, quantity) = match value.rsplit_once(':') {
        Some((id, qty)) => {
            let qty = qty
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity in `{value}`"))?;
            (id, qty)
        }
        None => (value, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing item id in `{value}`"));
    }
    Ok(RequestedLine::new(id, quantity))
}

/// Parse a category filter; unknown names are rejected rather than mapped to `other`.
pub fn parse_category(value: &str) -> Option<Category> {
    let wanted = value.trim().to_lowercase();
    Category::ALL.into_iter().find(|c| c.as_str() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_arg() {
        assert_eq!(parse_item_arg("a:3").unwrap(), RequestedLine::new("a", 3));
        assert_eq!(parse_item_arg("0780:1").unwrap(), RequestedLine::new("0780", 1));
        assert_eq!(parse_item_arg("milk").unwrap(), RequestedLine::new("milk", 1));
        assert_eq!(parse_item_arg("a:-2").unwrap(), RequestedLine::new("a", -2));
        assert!(parse_item_arg("a:x").is_err());
        assert!(parse_item_arg(":2").is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Dairy"), Some(Category::Dairy));
        assert_eq!(parse_category("frozen"), None);
    }

    #[test]
    fn test_cli_parses_optimize() {
        let cli = Cli::parse_from([
            "eco_basket",
            "optimize",
            "--budget",
            "1500",
            "--item",
            "a:1",
            "--item",
            "c",
            "--policy",
            "best_match",
        ]);
        match cli.command {
            Some(Command::Optimize {
                budget, item, policy, ..
            }) => {
                assert_eq!(budget, Some(1500));
                assert_eq!(item.len(), 2);
                assert_eq!(policy, Some(SubstitutionPolicy::BestMatch));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.catalog, PathBuf::from("catalog.json"));
    }
}
