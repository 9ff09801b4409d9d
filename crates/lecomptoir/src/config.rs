// Engine configuration
//
// *La Configuration* (The Configuration) - Rule-set overrides from disk

use anyhow::{Context, Result};
use leclassement::RuleSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default rules file looked up in the working directory.
pub const DEFAULT_RULES_FILE: &str = "leconseil.toml";

/// On-disk engine configuration.
///
/// Today this is just the semantic rule set; keeping the wrapper table
/// means the file format can grow without breaking existing files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Semantic-validity rule configuration.
    pub rules: RuleSet,
}

impl EngineConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. With no explicit path, the
    /// default file is used when present, otherwise built-in defaults —
    /// running without a config file is the normal case.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_RULES_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    debug!("No rules file found, using built-in defaults");
                    Ok(EngineConfig::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;

        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse rules file: {}", path.display()))?;

        debug!("Loaded rules from {}", path.display());
        Ok(config)
    }
}
