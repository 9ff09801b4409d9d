// Catalog ingestion
//
// *L'Ingestion* (The Ingestion) - CSV and JSON catalog loading with schema
// normalization

use crate::catalog::Catalog;
use crate::category::{derive_category_id, Category};
use crate::link::normalize_link;
use crate::method::{AttributeValues, Method, DEFAULT_DESCRIPTION};
use crate::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column ids reserved for method metadata in the CSV layout.
///
/// Every other column is an attribute category whose id is derived from the
/// header label.
const METADATA_COLUMNS: &[&str] = &[
    "name",
    "description",
    "cost_tier",
    "connectivity",
    "type",
    "link",
    "link2",
];

/// Separator between values inside one CSV attribute cell.
const VALUE_SEPARATOR: char = ';';

/// Cell spellings that mean "no declared constraint", compared
/// case-insensitively.
const NO_CONSTRAINT_PLACEHOLDERS: &[&str] = &["n/a", "na", "-"];

/// Load a catalog from a `.csv` or `.json` file, dispatching on extension.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load a CSV catalog from disk.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let data = fs::read_to_string(path.as_ref())?;
    from_csv_str(&data)
}

/// Load a JSON catalog from disk.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let data = fs::read_to_string(path.as_ref())?;
    from_json_str(&data)
}

/// Role a CSV column plays during ingestion.
enum ColumnRole {
    Name,
    Description,
    CostTier,
    Connectivity,
    Kind,
    Link,
    Link2,
    /// Attribute category, indexed into the derived category list.
    Category(usize),
    /// Duplicate or unusable header.
    Skip,
}

/// Parse a CSV catalog.
///
/// One row per method. The reserved metadata columns are matched by their
/// normalized header id; every remaining column becomes an attribute
/// category. Attribute cells hold `;`-separated value lists; empty cells and
/// no-value placeholders mean the method declares no constraint for that
/// category. A category is marked multi-valued when any method declares more
/// than one value for it.
pub fn from_csv_str(data: &str) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();

    let mut roles = Vec::with_capacity(headers.len());
    let mut categories: Vec<Category> = Vec::new();
    let mut saw_name = false;

    for header in headers.iter() {
        let id = derive_category_id(header);
        let role = match id.as_str() {
            "name" => {
                saw_name = true;
                ColumnRole::Name
            }
            "description" => ColumnRole::Description,
            "cost_tier" => ColumnRole::CostTier,
            "connectivity" => ColumnRole::Connectivity,
            "type" => ColumnRole::Kind,
            "link" => ColumnRole::Link,
            "link2" => ColumnRole::Link2,
            "" => {
                warn!("Skipping CSV column with unusable header: {header:?}");
                ColumnRole::Skip
            }
            _ => {
                if categories.iter().any(|category| category.id == id) {
                    warn!("Skipping duplicate CSV category column: {header}");
                    ColumnRole::Skip
                } else {
                    categories.push(Category {
                        id,
                        name: header.to_string(),
                        multi_valued: false,
                    });
                    ColumnRole::Category(categories.len() - 1)
                }
            }
        };
        roles.push(role);
    }

    if !saw_name {
        return Err(CatalogError::MissingColumn("name".to_string()));
    }

    let mut methods = Vec::new();

    for record in reader.records() {
        let record = record?;
        let mut method = Method::new("");

        for (index, role) in roles.iter().enumerate() {
            let cell = record.get(index).unwrap_or("");
            match role {
                ColumnRole::Name => method.name = cell.trim().to_string(),
                ColumnRole::Description => {
                    if !cell.trim().is_empty() {
                        method.description = cell.trim().to_string();
                    }
                }
                ColumnRole::CostTier => method.cost_tier = non_empty(cell),
                ColumnRole::Connectivity => method.connectivity = non_empty(cell),
                ColumnRole::Kind => method.kind = non_empty(cell),
                ColumnRole::Link => method.link = normalize_link(cell),
                ColumnRole::Link2 => method.link2 = normalize_link(cell),
                ColumnRole::Category(category_index) => {
                    let values = parse_attribute_cell(cell);
                    if !values.is_empty() {
                        if values.len() > 1 {
                            categories[*category_index].multi_valued = true;
                        }
                        method
                            .attributes
                            .insert(categories[*category_index].id.clone(), values);
                    }
                }
                ColumnRole::Skip => {}
            }
        }

        if method.name.is_empty() {
            warn!("Skipping CSV row without a method name");
            continue;
        }
        debug!("Ingested method: {}", method.name);
        methods.push(method);
    }

    info!(
        "Loaded {} methods across {} categories from CSV",
        methods.len(),
        categories.len()
    );
    Ok(Catalog::new(categories, methods))
}

/// On-disk JSON catalog shape.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    methods: Vec<Method>,
}

/// Parse a JSON catalog.
///
/// The JSON layout mirrors the in-memory model. Categories may be omitted
/// entirely, in which case they are synthesized from the attribute keys the
/// methods actually use. Descriptions, links, and empty constraint sets are
/// normalized exactly as in CSV ingestion.
pub fn from_json_str(data: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(data)?;

    let mut methods = file.methods;
    for method in &mut methods {
        if method.description.trim().is_empty() {
            method.description = DEFAULT_DESCRIPTION.to_string();
        }
        method.link = method.link.as_deref().and_then(normalize_link);
        method.link2 = method.link2.as_deref().and_then(normalize_link);
        // An empty constraint set is the same as no constraint.
        method.attributes.retain(|_, values| !values.is_empty());
    }

    let mut categories = file.categories;
    for category in &mut categories {
        if category.id.trim().is_empty() {
            category.id = derive_category_id(&category.name);
        }
    }

    if categories.is_empty() {
        categories = synthesize_categories(&methods);
    }

    info!(
        "Loaded {} methods across {} categories from JSON",
        methods.len(),
        categories.len()
    );
    Ok(Catalog::new(categories, methods))
}

/// Derive category descriptors from the attribute keys methods declare.
fn synthesize_categories(methods: &[Method]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for method in methods {
        for (id, values) in &method.attributes {
            match categories.iter_mut().find(|category| &category.id == id) {
                Some(category) => {
                    if values.len() > 1 {
                        category.multi_valued = true;
                    }
                }
                None => categories.push(Category {
                    id: id.clone(),
                    name: id.clone(),
                    multi_valued: values.len() > 1,
                }),
            }
        }
    }

    categories
}

/// Split one attribute cell into its unique trimmed values.
fn parse_attribute_cell(cell: &str) -> AttributeValues {
    cell.split(VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| {
            !NO_CONSTRAINT_PLACEHOLDERS.contains(&value.to_ascii_lowercase().as_str())
        })
        .map(str::to_string)
        .collect()
}

fn non_empty(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
