use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::store::Catalog;
use crate::error::{BasketError, Result};
use crate::models::{CatalogItem, Category, ShoppingRequest};

/// Flat CSV row; ids stay text so barcodes keep their leading zeros.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    category: String,
    price: u64,
    eco_score: f64,
    social_score: f64,
}

impl From<CsvRow> for CatalogItem {
    fn from(row: CsvRow) -> Self {
        CatalogItem::new(
            row.id,
            row.name,
            Category::from(row.category),
            row.price,
            row.eco_score.round() as i64,
            row.social_score.round() as i64,
        )
    }
}

impl From<&CatalogItem> for CsvRow {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.to_string(),
            price: item.price,
            eco_score: item.eco_score as f64,
            social_score: item.social_score as f64,
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

fn validate(items: Vec<CatalogItem>) -> Result<Vec<CatalogItem>> {
    if let Some(bad) = items.iter().find(|i| !i.is_valid()) {
        return Err(BasketError::InvalidInput(format!(
            "catalog item `{}` ({}) needs a non-empty id and a positive price",
            bad.id, bad.name
        )));
    }
    Ok(items)
}

/// Load a catalog from a JSON or CSV file (chosen by extension).
///
/// Duplicate ids collapse as described on [`Catalog::new`].
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();

    let items: Vec<CatalogItem> = if is_csv(path) {
        let mut reader = csv::Reader::from_path(path)?;
        reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(CatalogItem::from))
            .collect::<std::result::Result<_, _>>()?
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    };

    let raw_count = items.len();
    let catalog = Catalog::new(validate(items)?);
    if catalog.len() < raw_count {
        warn!(
            duplicates = raw_count - catalog.len(),
            "duplicate catalog ids collapsed"
        );
    }
    debug!(items = catalog.len(), path = %path.display(), "catalog loaded");

    Ok(catalog)
}

/// Save a catalog to a JSON or CSV file (chosen by extension).
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();

    if is_csv(path) {
        let mut writer = csv::Writer::from_path(path)?;
        for item in catalog.items() {
            writer.serialize(CsvRow::from(item))?;
        }
        writer.flush()?;
    } else {
        let json = serde_json::to_string_pretty(catalog.items())?;
        fs::write(path, json)?;
    }
    Ok(())
}

/// Load a shopping request (`{"budget": .., "items": [{"id": .., "quantity": ..}]}`).
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<ShoppingRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
