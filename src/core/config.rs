//! Census configuration with documented constants
//!
//! All tunable numbers used by the region roll-up live here, with the
//! behavior each one controls.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Configuration for region statistics recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusConfig {
    /// Ceiling for a region's total population
    ///
    /// Summing settlement populations saturates here instead of wrapping.
    /// The default matches the largest population the authoring tools can
    /// store in a single record (a signed 32-bit integer).
    pub population_ceiling: u64,

    /// Percent values strictly above this are read on a 0-100 scale
    ///
    /// At the default (1.0), `60` means 60% and `0.6` means 60%.
    /// A value of exactly `1.0` is read as a fraction, i.e. 100%.
    pub percent_scale_threshold: f64,

    /// Weight given to an unpopulated area whose size is unknown
    ///
    /// Missing, zero, negative or non-numeric area weights fall back to this.
    pub default_area_weight: f64,

    /// Minimum region count before `recompute_all` uses parallel processing
    ///
    /// Below this, thread overhead exceeds the benefit.
    pub parallel_threshold: usize,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            population_ceiling: i32::MAX as u64,
            percent_scale_threshold: 1.0,
            default_area_weight: 1.0,
            parallel_threshold: 8,
        }
    }
}

impl CensusConfig {
    /// Parse a config from TOML; omitted fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded census config from {}", path.display());
        Ok(config)
    }
}
