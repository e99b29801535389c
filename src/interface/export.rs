use std::path::Path;

use crate::error::Result;
use crate::models::OptimizationResult;
use crate::optimizer::{line_utility, UtilityParams};

/// Write the chosen basket to a CSV file, one row per line.
pub fn write_basket_csv(
    result: &OptimizationResult,
    params: &UtilityParams,
    path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "id",
        "name",
        "category",
        "quantity",
        "unit_price",
        "total_price",
        "eco_score",
        "social_score",
        "utility",
    ])?;

    for (i, line) in result.basket.lines.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            line.id.clone(),
            line.name.clone(),
            line.category.to_string(),
            line.quantity.to_string(),
            line.unit_price.to_string(),
            line.total_price.to_string(),
            line.eco_score.to_string(),
            line.social_score.to_string(),
            format!("{:.3}", line_utility(line, params)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Serialize a result as pretty JSON.
pub fn result_json(result: &OptimizationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogItem, Category, EnrichedLine, Objective};
    use crate::optimizer::build_basket;
    use tempfile::NamedTempFile;

    fn sample_result() -> OptimizationResult {
        let params = UtilityParams::default();
        let lentils = CatalogItem::new("7", "Lentils, dry", Category::Legumes, 1100, 85, 70);
        let basket = build_basket(
            Objective::Sustainability,
            vec![EnrichedLine::new(&lentils, 2)],
            &params,
        );
        OptimizationResult {
            front: vec![basket.clone()],
            basket,
            original_total: 2200,
            substitutions: Vec::new(),
            infeasible: Vec::new(),
        }
    }

    #[test]
    fn test_write_basket_csv() {
        let file = NamedTempFile::new().unwrap();
        write_basket_csv(&sample_result(), &UtilityParams::default(), file.path()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[1], "id");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "Lentils, dry");
        assert_eq!(&rows[0][6], "2200");
    }

    #[test]
    fn test_result_json_is_stable() {
        let result = sample_result();
        let first = result_json(&result).unwrap();
        let second = result_json(&result).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"original_total\": 2200"));
    }
}
