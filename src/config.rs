//! Explicit frame configuration
//!
//! Settings travel with each frame instead of living in a global, so two
//! frames built with different settings never interfere.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rows sampled per column when inferring dtypes
pub const DEFAULT_DTYPE_SAMPLE_LIMIT: usize = 500;
pub const DEFAULT_MAX_DISPLAY_ROWS: usize = 10;
pub const DEFAULT_MAX_DISPLAY_COLUMNS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Upper bound on the rows scanned by dtype inference
    pub dtype_sample_limit: usize,
    /// Rows printed by `Display` before eliding
    pub max_display_rows: usize,
    /// Columns printed by `Display` before eliding
    pub max_display_columns: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            dtype_sample_limit: DEFAULT_DTYPE_SAMPLE_LIMIT,
            max_display_rows: DEFAULT_MAX_DISPLAY_ROWS,
            max_display_columns: DEFAULT_MAX_DISPLAY_COLUMNS,
        }
    }
}

impl FrameConfig {
    pub fn with_dtype_sample_limit(mut self, limit: usize) -> Self {
        self.dtype_sample_limit = limit;
        self
    }

    pub fn with_max_display_rows(mut self, rows: usize) -> Self {
        self.max_display_rows = rows;
        self
    }

    pub fn with_max_display_columns(mut self, columns: usize) -> Self {
        self.max_display_columns = columns;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load settings from a `.toml`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading frame config from {}", path.display());
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::Config(format!(
                "unsupported config file '{}': expected .toml, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FrameConfig::from_toml_str("max_display_rows = 3").unwrap();
        assert_eq!(config.max_display_rows, 3);
        assert_eq!(config.dtype_sample_limit, DEFAULT_DTYPE_SAMPLE_LIMIT);
    }

    #[test]
    fn test_yaml() {
        let config = FrameConfig::from_yaml_str("dtype_sample_limit: 20\n").unwrap();
        assert_eq!(config.dtype_sample_limit, 20);
        assert_eq!(config.max_display_columns, DEFAULT_MAX_DISPLAY_COLUMNS);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(FrameConfig::from_toml_str("max_display_rows = \"many\"").is_err());
    }
}
