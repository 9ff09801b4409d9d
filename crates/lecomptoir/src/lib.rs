//! leconseil - Method Recommendation Gateway
//!
//! *Le Comptoir* (The Counter) - CLI surface and configuration for
//! LeConseil: loads a catalog, builds the user's filter selection, runs the
//! classification engine, and renders the resulting tiers.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod cli;
pub mod config;
pub mod output;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::EngineConfig;

/// Gateway library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
