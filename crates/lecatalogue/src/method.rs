// Measurement methods
//
// *La Méthode* (The Method) - Catalog entries with attribute constraints and
// passthrough metadata

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default description applied when a catalog source omits one.
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Values a method supports for one category.
pub type AttributeValues = BTreeSet<String>;

/// Mapping from category id to supported values.
///
/// An absent key means the method declares no constraint for that category
/// and is treated as universally compatible there. Ordered maps keep
/// iteration and serialized output deterministic.
pub type AttributeMap = BTreeMap<String, AttributeValues>;

/// A research-measurement method as loaded from a catalog source.
///
/// Immutable after catalog load; the recommendation engine only ever reads
/// `name` and `attributes`. Everything else is passthrough metadata for
/// presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Unique display identifier; doubles as the logical key.
    pub name: String,

    /// Free-text description, defaulted when the source omits it.
    #[serde(default = "default_description")]
    pub description: String,

    /// Per-category supported values.
    #[serde(default)]
    pub attributes: AttributeMap,

    /// Cost tier label, passthrough only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_tier: Option<String>,

    /// Connectivity requirement label, passthrough only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<String>,

    /// Method type label, passthrough only.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Primary reference link, normalized at ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Secondary reference link, normalized at ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link2: Option<String>,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl Method {
    /// Create a method with the given name and no declared constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: default_description(),
            attributes: AttributeMap::new(),
            cost_tier: None,
            connectivity: None,
            kind: None,
            link: None,
            link2: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare the supported values for one category.
    ///
    /// An empty value list is a no-op: an empty constraint set is
    /// indistinguishable from no constraint, so it is never stored.
    #[must_use]
    pub fn with_attribute<I, S>(mut self, category_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: AttributeValues = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.attributes.insert(category_id.into(), values);
        }
        self
    }

    /// Supported values for a category, if the method declares any.
    pub fn values_for(&self, category_id: &str) -> Option<&AttributeValues> {
        self.attributes.get(category_id)
    }

    /// Whether the method declares at least one value for a category.
    pub fn declares(&self, category_id: &str) -> bool {
        self.values_for(category_id)
            .map(|values| !values.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_method_has_default_description() {
        let method = Method::new("Photovoice");
        assert_eq!(method.description, DEFAULT_DESCRIPTION);
        assert!(method.attributes.is_empty());
    }

    #[test]
    fn test_with_attribute_stores_unique_values() {
        let method = Method::new("Surveys")
            .with_attribute("sem_level", ["Individual", "Community", "Individual"]);

        let values = method.values_for("sem_level").unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.contains("Individual"));
        assert!(values.contains("Community"));
    }

    #[test]
    fn test_empty_attribute_list_is_not_stored() {
        let method = Method::new("Surveys").with_attribute("sem_level", Vec::<String>::new());
        assert!(method.values_for("sem_level").is_none());
        assert!(!method.declares("sem_level"));
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let method: Method = serde_json::from_str(r#"{"name": "Administrative Data"}"#).unwrap();
        assert_eq!(method.name, "Administrative Data");
        assert_eq!(method.description, DEFAULT_DESCRIPTION);
        assert!(method.attributes.is_empty());
        assert!(method.link.is_none());
    }

    #[test]
    fn test_type_field_round_trips_as_kind() {
        let method: Method =
            serde_json::from_str(r#"{"name": "Surveys", "type": "Quantitative"}"#).unwrap();
        assert_eq!(method.kind.as_deref(), Some("Quantitative"));

        let json = serde_json::to_string(&method).unwrap();
        assert!(json.contains(r#""type":"Quantitative""#));
    }
}
