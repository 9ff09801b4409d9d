//! lecatalogue - Method Catalog & Ingestion
//!
//! *Le Catalogue* (The Catalog) - Normalized measurement-method catalog with
//! CSV/JSON ingestion, attribute modeling, link normalization, and stable
//! category identifiers.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

mod catalog;
mod category;
mod ingest;
mod link;
mod method;

pub use catalog::Catalog;
pub use category::{derive_category_id, Category};
pub use ingest::{from_csv_str, from_json_str, load_catalog, load_csv, load_json};
pub use link::normalize_link;
pub use method::{AttributeMap, AttributeValues, Method, DEFAULT_DESCRIPTION};

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading a catalog
///
/// Loading a catalog source is the one place in LeConseil where failure is a
/// real error. Once a `Catalog` exists, downstream consumers never fail on
/// its contents: malformed attribute data degrades to "no declared
/// constraint" during ingestion instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O error reading a catalog source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file extension is neither `.csv` nor `.json`
    #[error("Unsupported catalog format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),

    /// CSV catalog is missing a required column
    #[error("CSV catalog is missing required column: {0}")]
    MissingColumn(String),
}

/// Library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
