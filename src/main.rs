use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use eco_basket_rs::catalog::{
    import_products, load_catalog, load_request, read_raw_products, save_catalog, Catalog,
};
use eco_basket_rs::cli::{parse_category, Cli, Command};
use eco_basket_rs::config::{AppConfig, ConfigOverrides, EngineConfig, SubstitutionPolicy};
use eco_basket_rs::error::{BasketError, Result};
use eco_basket_rs::interface::{
    display_catalog, display_result, prompt_budget, prompt_items, prompt_substitution,
    result_json, write_basket_csv,
};
use eco_basket_rs::logging::init_logging;
use eco_basket_rs::models::{RequestedLine, ShoppingRequest};
use eco_basket_rs::optimizer::{apply_substitution, optimize, UtilityParams};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let policy = match &command {
        Command::Optimize { policy, .. } | Command::Shop { policy } => *policy,
        _ => None,
    };
    let config = AppConfig::load(
        cli.config.as_deref(),
        ConfigOverrides {
            log_level: cli.log_level.clone(),
            substitution_policy: policy,
            max_budget: cli.max_budget,
        },
    )?;
    init_logging(&config.logging);

    match command {
        Command::Optimize {
            request,
            budget,
            item,
            json,
            csv,
            ..
        } => {
            let request = match request {
                Some(path) => load_request(path)?,
                None => ShoppingRequest {
                    budget: budget.ok_or_else(|| {
                        BasketError::InvalidInput("--budget or --request is required".to_string())
                    })?,
                    items: item,
                },
            };
            cmd_optimize(&cli.catalog, &request, &config.engine, json, csv.as_deref())
        }
        Command::Shop { .. } => cmd_shop(&cli.catalog, &config.engine),
        Command::Catalog { category } => cmd_catalog(&cli.catalog, category.as_deref()),
        Command::Import {
            source,
            seed,
            limit,
        } => cmd_import(&source, &cli.catalog, seed, limit),
    }
}

fn open_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(BasketError::InvalidInput(format!(
            "catalog file not found: {} (use `import` to build one)",
            path.display()
        )));
    }
    let catalog = load_catalog(path)?;
    info!(items = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Optimize a request given on the command line or in a file.
fn cmd_optimize(
    catalog_path: &Path,
    request: &ShoppingRequest,
    engine: &EngineConfig,
    json: bool,
    csv: Option<&Path>,
) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let result = optimize(&request.items, request.budget, &catalog, engine)?;
    info!(
        lines = result.basket.len(),
        total = result.basket.total_price,
        "basket chosen"
    );

    if json {
        println!("{}", result_json(&result)?);
    } else {
        display_result(&result);
    }

    if let Some(path) = csv {
        write_basket_csv(&result, &UtilityParams::from(engine), path)?;
        info!(path = %path.display(), "basket written");
    }

    Ok(())
}

/// Interactive session: build a list, optimize, then apply substitutions until done.
fn cmd_shop(catalog_path: &Path, engine: &EngineConfig) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;
    if catalog.is_empty() {
        println!("The catalog is empty. Use `import` to fill it.");
        return Ok(());
    }

    println!("Loaded {} products", catalog.len());
    if engine.substitution_policy == SubstitutionPolicy::BestMatch {
        println!("Substitutions pick the most sustainable alternative.");
    }
    println!();

    let budget = prompt_budget()?;
    let mut request: Vec<RequestedLine> = prompt_items(&catalog)?;

    if request.is_empty() {
        println!("Nothing to optimize.");
        return Ok(());
    }

    loop {
        let result = match optimize(&request, budget, &catalog, engine) {
            Ok(result) => result,
            Err(e) if e.is_rejected_request() => {
                warn!(error = %e, "request rejected");
                println!("{}", e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        display_result(&result);

        match prompt_substitution(&result.substitutions)? {
            Some(sub) => {
                println!("Swapping {} for {}", sub.from_name, sub.to.name);
                request = apply_substitution(&request, sub);
            }
            None => break,
        }
    }

    Ok(())
}

/// List catalog items, optionally filtered by category.
fn cmd_catalog(catalog_path: &Path, category: Option<&str>) -> Result<()> {
    let catalog = open_catalog(catalog_path)?;

    match category {
        Some(name) => {
            let category = parse_category(name)
                .ok_or_else(|| BasketError::InvalidInput(format!("unknown category: {name}")))?;
            display_catalog(&catalog.by_category(category), category.as_str());
        }
        None => {
            let items: Vec<_> = catalog.items().iter().collect();
            display_catalog(&items, "Catalog");
        }
    }

    Ok(())
}

/// Convert a raw Open Food Facts dump into a catalog file.
fn cmd_import(source: &Path, target: &Path, seed: u64, limit: usize) -> Result<()> {
    let raw = read_raw_products(source)?;
    let catalog = Catalog::new(import_products(&raw, seed, limit));

    save_catalog(target, &catalog)?;
    info!(items = catalog.len(), path = %target.display(), "catalog saved");
    println!("Imported {} products into {}", catalog.len(), target.display());

    Ok(())
}
