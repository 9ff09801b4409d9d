// User filter selections
//
// *La Sélection* (The Selection) - Immutable per-request filter snapshot

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The filter values a user chose, keyed by category id.
///
/// Constructed fresh per recommendation request and read-only to the
/// engine. A category mapped to an empty set means "no filter applied",
/// identical to the category being absent. Keys that name no known catalog
/// category are simply never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    filters: BTreeMap<String, BTreeSet<String>>,
}

impl Selection {
    /// Create an empty selection (no filters applied).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the chosen values for one category.
    #[must_use]
    pub fn with<I, S>(mut self, category_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(category_id, values);
        self
    }

    /// Replace the chosen values for one category.
    pub fn set<I, S>(&mut self, category_id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .insert(category_id.into(), values.into_iter().map(Into::into).collect());
    }

    /// Chosen values for a category, if the user filtered on it.
    ///
    /// An empty chosen set reads as "not filtered" and returns `None`.
    pub fn values(&self, category_id: &str) -> Option<&BTreeSet<String>> {
        self.filters.get(category_id).filter(|values| !values.is_empty())
    }

    /// Iterate the categories the user actually filtered on.
    pub fn filtered(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.filters
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(id, values)| (id.as_str(), values))
    }

    /// Number of categories with a non-empty selection.
    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    /// Whether the user applied no filters at all.
    pub fn is_unfiltered(&self) -> bool {
        self.filtered_count() == 0
    }
}

impl From<BTreeMap<String, BTreeSet<String>>> for Selection {
    fn from(filters: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { filters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_unfiltered() {
        let selection = Selection::new();
        assert!(selection.is_unfiltered());
        assert_eq!(selection.filtered_count(), 0);
    }

    #[test]
    fn test_empty_value_set_counts_as_unfiltered() {
        let selection = Selection::new().with("sem_level", Vec::<String>::new());
        assert!(selection.is_unfiltered());
        assert!(selection.values("sem_level").is_none());
    }

    #[test]
    fn test_filtered_count_ignores_empty_categories() {
        let selection = Selection::new()
            .with("sem_level", ["Individual"])
            .with("resources", Vec::<String>::new())
            .with("technology_access", ["Low", "Medium"]);

        assert_eq!(selection.filtered_count(), 2);
        let filtered: Vec<&str> = selection.filtered().map(|(id, _)| id).collect();
        assert_eq!(filtered, vec!["sem_level", "technology_access"]);
    }

    #[test]
    fn test_set_replaces_values() {
        let mut selection = Selection::new().with("sem_level", ["Individual"]);
        selection.set("sem_level", ["Community"]);

        let values = selection.values("sem_level").unwrap();
        assert_eq!(values.len(), 1);
        assert!(values.contains("Community"));
    }

    #[test]
    fn test_deserializes_from_plain_map() {
        let selection: Selection =
            serde_json::from_str(r#"{"sem_level": ["Individual"]}"#).unwrap();
        assert_eq!(selection.filtered_count(), 1);
        assert!(selection.values("sem_level").unwrap().contains("Individual"));
    }
}
