// Attribute categories
//
// *La Catégorie* (The Category) - Filterable attribute categories and stable
// identifier derivation

use serde::{Deserialize, Serialize};

/// A filterable attribute category (e.g. measurement level, technology access).
///
/// The `id` is the only field the recommendation engine consults; `name` and
/// `multi_valued` are passthrough for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier derived from the display name. Unique per catalog.
    pub id: String,

    /// Display label. Never consulted by matching logic.
    pub name: String,

    /// Whether a user may select more than one value for this category.
    #[serde(default = "default_multi_valued")]
    pub multi_valued: bool,
}

fn default_multi_valued() -> bool {
    true
}

impl Category {
    /// Create a category from a display name, deriving its stable id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: derive_category_id(&name),
            name,
            multi_valued: true,
        }
    }

    /// Set the multi-valued flag.
    #[must_use]
    pub fn with_multi_valued(mut self, multi_valued: bool) -> Self {
        self.multi_valued = multi_valued;
        self
    }
}

/// Derive a stable category identifier from a display label.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters to a single underscore. Leading and trailing separators are
/// trimmed, so `"SEM Level"` becomes `"sem_level"` and `"Cost (Tier)"`
/// becomes `"cost_tier"`.
pub fn derive_category_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !id.is_empty() {
                id.push('_');
            }
            id.push(ch.to_ascii_lowercase());
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    id
}
