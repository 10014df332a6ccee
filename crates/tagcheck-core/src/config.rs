// File: src/config.rs
// Purpose: Engine configuration, optionally loaded from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deepest `struct` nesting the engine descends into
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Layout of a config file: settings live under `[validation]`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    validation: EngineConfig,
}

fn default_max_depth() -> usize {
    32
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl EngineConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the `[validation]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: ConfigFile = toml::from_str(content).context("Failed to parse validation config")?;
        Ok(file.validation)
    }

    /// Load configuration from a TOML file. A missing or blank file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
