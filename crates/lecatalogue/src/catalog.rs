// Catalog container
//
// *Le Catalogue* (The Catalog) - The normalized, ordered method catalog

use crate::category::Category;
use crate::method::Method;
use std::collections::BTreeSet;
use tracing::warn;

/// The normalized set of categories and methods consumed by the engine.
///
/// Constructed once at load time and immutable thereafter. Method order is
/// the stable catalog order used to break ranking ties, so it is preserved
/// exactly as ingested.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    methods: Vec<Method>,
}

impl Catalog {
    /// Build a catalog, deduplicating categories by id and methods by name.
    ///
    /// First occurrence wins; later duplicates are dropped with a warning.
    pub fn new(categories: Vec<Category>, methods: Vec<Method>) -> Self {
        let mut seen_ids = BTreeSet::new();
        let categories = categories
            .into_iter()
            .filter(|category| {
                if seen_ids.insert(category.id.clone()) {
                    true
                } else {
                    warn!("Dropping duplicate category id: {}", category.id);
                    false
                }
            })
            .collect();

        let mut seen_names = BTreeSet::new();
        let methods = methods
            .into_iter()
            .filter(|method| {
                if seen_names.insert(method.name.clone()) {
                    true
                } else {
                    warn!("Dropping duplicate method: {}", method.name);
                    false
                }
            })
            .collect();

        Self { categories, methods }
    }

    /// Methods in stable catalog order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Categories in ingestion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Every value any method declares for a category.
    ///
    /// Useful for presenting the selectable options of a filter.
    pub fn option_values(&self, category_id: &str) -> BTreeSet<String> {
        self.methods
            .iter()
            .filter_map(|method| method.values_for(category_id))
            .flat_map(|values| values.iter().cloned())
            .collect()
    }

    /// Number of methods in the catalog.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the catalog holds no methods.
    ///
    /// An empty catalog is valid input everywhere downstream.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_categories_keep_first() {
        let catalog = Catalog::new(
            vec![
                Category::new("SEM Level"),
                Category::new("SEM Level").with_multi_valued(false),
            ],
            Vec::new(),
        );

        assert_eq!(catalog.categories().len(), 1);
        assert!(catalog.category("sem_level").unwrap().multi_valued);
    }

    #[test]
    fn test_duplicate_methods_keep_first() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![
                Method::new("Surveys").with_description("first"),
                Method::new("Surveys").with_description("second"),
            ],
        );

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.method("Surveys").unwrap().description, "first");
    }

    #[test]
    fn test_option_values_unions_across_methods() {
        let catalog = Catalog::new(
            vec![Category::new("SEM Level")],
            vec![
                Method::new("Surveys").with_attribute("sem_level", ["Individual"]),
                Method::new("Focus Groups").with_attribute("sem_level", ["Community", "Individual"]),
            ],
        );

        let options = catalog.option_values("sem_level");
        assert_eq!(options.len(), 2);
        assert!(options.contains("Community"));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.method("anything").is_none());
    }
}
