// CLI Interface
//
// This module provides the command-line interface for LeConseil.

use crate::config::EngineConfig;
use crate::output;
use anyhow::{bail, Context, Result as AnyhowResult};
use clap::{Parser, Subcommand, ValueEnum};
use lecatalogue::load_catalog;
use leclassement::{Recommender, Selection};
use std::path::PathBuf;
use tracing::info;

/// LeConseil - Measurement-Method Recommendation Engine
#[derive(Parser, Debug)]
#[command(name = "leconseil")]
#[command(author = "LeConseil Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recommend research-measurement methods for a filter selection", long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every catalog method into suggestion tiers for a selection
    Recommend {
        /// Path to the catalog file (.csv or .json)
        #[arg(long = "catalog", value_name = "PATH")]
        catalog: PathBuf,

        /// Path to a TOML rules override file
        #[arg(long = "rules", value_name = "PATH")]
        rules: Option<PathBuf>,

        /// Filter selection, repeatable: CATEGORY=VALUE[,VALUE...]
        #[arg(long = "select", value_name = "CATEGORY=VALUES")]
        select: Vec<String>,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Load a catalog and print a summary of its categories and methods
    Catalog {
        /// Path to the catalog file (.csv or .json)
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Output format for recommendation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tier listing
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> AnyhowResult<()> {
        init_logging_impl(self.verbose);

        match self.command {
            Commands::Recommend {
                catalog,
                rules,
                select,
                format,
            } => cmd_recommend_impl(catalog, rules, select, format),
            Commands::Catalog { path } => cmd_catalog_impl(path),
        }
    }
}

/// Initialize logging implementation
fn init_logging_impl(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Parse repeated `--select CATEGORY=VALUE[,VALUE...]` arguments.
///
/// Repeating a category merges its values, so
/// `--select tech=Low --select tech=Medium` equals `--select tech=Low,Medium`.
pub fn parse_selection(args: &[String]) -> AnyhowResult<Selection> {
    let mut selection = Selection::new();

    for arg in args {
        let Some((category, values)) = arg.split_once('=') else {
            bail!("Invalid --select argument (expected CATEGORY=VALUES): {arg}");
        };
        let category = category.trim();
        if category.is_empty() {
            bail!("Invalid --select argument (empty category): {arg}");
        }

        let mut merged: Vec<String> = selection
            .values(category)
            .map(|existing| existing.iter().cloned().collect())
            .unwrap_or_default();
        merged.extend(
            values
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        );

        selection.set(category, merged);
    }

    Ok(selection)
}

/// Recommend command implementation
fn cmd_recommend_impl(
    catalog_path: PathBuf,
    rules_path: Option<PathBuf>,
    select: Vec<String>,
    format: OutputFormat,
) -> AnyhowResult<()> {
    let config = EngineConfig::load(rules_path.as_deref())?;
    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("Failed to load catalog: {}", catalog_path.display()))?;
    let selection = parse_selection(&select)?;

    info!(
        "Classifying {} methods against {} filtered categories",
        catalog.len(),
        selection.filtered_count()
    );

    let recommender = Recommender::new(config.rules);
    let classification = recommender.classify(&catalog, &selection);

    match format {
        OutputFormat::Json => println!("{}", output::render_json(&classification)?),
        OutputFormat::Text => print!("{}", output::render_text(&classification)),
    }

    Ok(())
}

/// Catalog command implementation
fn cmd_catalog_impl(path: PathBuf) -> AnyhowResult<()> {
    let catalog = load_catalog(&path)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

    println!("Catalog: {}", path.display());
    println!("  Methods: {}", catalog.len());
    println!("  Categories: {}", catalog.categories().len());

    for category in catalog.categories() {
        let options = catalog.option_values(&category.id);
        let values: Vec<&str> = options.iter().map(String::as_str).collect();
        println!(
            "    {} ({}){}: {}",
            category.name,
            category.id,
            if category.multi_valued { " [multi]" } else { "" },
            values.join(", ")
        );
    }

    let linked = catalog
        .methods()
        .iter()
        .filter(|method| method.link.is_some() || method.link2.is_some())
        .count();
    println!("  Methods with reference links: {linked}");

    Ok(())
}
