//! Runner configuration.
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [limits]
//! max_component_len = 16
//! max_path_len = 256
//!
//! [output]
//! format = "text"
//! dump_tree = false
//!
//! [logging]
//! level = "warn"
//! ```

use std::path::Path;

use aclfs_core::PathLimits;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "ACLFS_CONFIG";

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab separated lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Print the final namespace after the reports
    pub dump_tree: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclfsConfig {
    /// Path length limits
    pub limits: PathLimits,
    /// Output settings
    pub output: OutputConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AclfsConfig {
    /// Load configuration from `path`, or defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check that the limits admit at least a one-character path.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_component_len == 0 {
            return Err(Error::config("limits.max_component_len must be positive"));
        }
        if self.limits.max_path_len < 2 {
            return Err(Error::config("limits.max_path_len must be at least 2"));
        }
        Ok(())
    }
}
