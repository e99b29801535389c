use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::models::{CatalogItem, Category};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// In-memory product catalog.
///
/// Keeps items in their original order (the substitution scan depends on it)
/// plus an index by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from a list of items.
    ///
    /// Duplicate ids keep the position of the first occurrence and the data
    /// of the last one.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            match catalog.index.get(&item.id) {
                Some(&pos) => catalog.items[pos] = item,
                None => {
                    catalog.index.insert(item.id.clone(), catalog.items.len());
                    catalog.items.push(item);
                }
            }
        }
        catalog
    }

    /// Get an item by id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&CatalogItem> {
        self.items.iter().filter(|i| i.category == category).collect()
    }

    /// Find an item by exact name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().find(|i| i.name.to_lowercase() == wanted)
    }

    /// Fuzzy name search, best match first.
    pub fn search(&self, query: &str) -> Vec<(&CatalogItem, f64)> {
        let query = query.trim().to_lowercase();
        let mut matches: Vec<(&CatalogItem, f64)> = self
            .items
            .iter()
            .map(|i| (i, jaro_winkler(&i.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        matches
    }

    /// Count of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Whole Milk", Category::Dairy, 900, 50, 60),
            CatalogItem::new("2", "Rye Bread", Category::Bakery, 1100, 65, 55),
            CatalogItem::new("3", "Black Beans", Category::Legumes, 1000, 85, 70),
        ]
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(sample_items());
        assert_eq!(catalog.get("2").unwrap().name, "Rye Bread");
        assert!(catalog.get("9").is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_duplicates_keep_first_position_last_data() {
        let mut items = sample_items();
        items.push(CatalogItem::new("1", "Oat Milk", Category::Dairy, 1200, 80, 60));
        let catalog = Catalog::new(items);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.items()[0].id, "1");
        assert_eq!(catalog.items()[0].name, "Oat Milk");
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let catalog = Catalog::new(sample_items());
        assert_eq!(catalog.find_by_name("rye bread").unwrap().id, "2");
        assert_eq!(catalog.find_by_name("  BLACK BEANS ").unwrap().id, "3");
        assert!(catalog.find_by_name("beans").is_none());
    }

    #[test]
    fn test_fuzzy_search() {
        let catalog = Catalog::new(sample_items());
        let matches = catalog.search("blak beans");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.id, "3");
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::new(sample_items());
        let dairy = catalog.by_category(Category::Dairy);
        assert_eq!(dairy.len(), 1);
        assert!(catalog.by_category(Category::Seafood).is_empty());
    }
}
