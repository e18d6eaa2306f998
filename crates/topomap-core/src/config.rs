//! Map configuration for topomap
//!
//! Configuration is read from TOML. An explicit path wins; otherwise the
//! global config file is used if it exists, and built-in defaults apply.

pub mod global;
pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{Result, TopoMapError};

pub use global::global_config_path;
pub use types::{
    CostConfig, MapConfig, PruningConfig, DEFAULT_BASELINE_COST, DEFAULT_COST_INCREMENT,
    DEFAULT_EDGE_THRESHOLD, DEFAULT_VERTEX_CHANCE,
};

impl CostConfig {
    /// Check that costs stay positive and finite
    pub fn validate(&self) -> Result<()> {
        if !(self.baseline.is_finite() && self.baseline > 0.0) {
            bail_invalid!("cost.baseline", self.baseline);
        }
        if !(self.increment.is_finite() && self.increment > 0.0) {
            bail_invalid!("cost.increment", self.increment);
        }
        Ok(())
    }
}

impl PruningConfig {
    /// Check that threshold and chance are probabilities
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.edge_threshold) {
            bail_invalid!("pruning.edge_threshold", self.edge_threshold);
        }
        if !(0.0..=1.0).contains(&self.vertex_chance) {
            bail_invalid!("pruning.vertex_chance", self.vertex_chance);
        }
        Ok(())
    }
}

impl MapConfig {
    /// Configuration for a directed map with default costs
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.cost.validate()?;
        self.pruning.validate()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TopoMapError::io_operation("read config", path.display(), e))?;
        let config: MapConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration: explicit path, then global file, then defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match global_config_path() {
            Ok(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading global config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TopoMapError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| TopoMapError::io_operation("write config", path.display(), e))?;
        Ok(())
    }
}
