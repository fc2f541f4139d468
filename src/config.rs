//! Harness configuration, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::locale::Locale;

/// Presentation settings for the CLI harness. Every field has a default so
/// an empty file (or no file) yields a working configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Locale table used by all metric formatters.
    #[serde(default)]
    pub locale: Locale,
    /// Empty-input and lower-bound value for chart maxima.
    #[serde(default = "default_chart_floor")]
    pub chart_floor: f64,
    /// Number of elapsed-month columns in the cohort heat-map.
    #[serde(default = "default_cohort_columns")]
    pub cohort_columns: usize,
}

fn default_chart_floor() -> f64 {
    1.0
}

fn default_cohort_columns() -> usize {
    7
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            chart_floor: default_chart_floor(),
            cohort_columns: default_cohort_columns(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::errors::SalesviewError::io(path, e))?;
        let config: ViewConfig = toml::from_str(&content)
            .map_err(|e| crate::errors::SalesviewError::config(path, e.to_string()))?;
        log::debug!("loaded view config from {}", path.display());
        Ok(config)
    }
}
