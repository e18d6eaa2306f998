//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Cost assigned to a freshly created edge
pub const DEFAULT_BASELINE_COST: f32 = 1.0;

/// Amount added on a failed traversal and subtracted on a successful one
pub const DEFAULT_COST_INCREMENT: f32 = 5.0;

/// Edges whose reliability falls below this are dropped by `prune_edges`
pub const DEFAULT_EDGE_THRESHOLD: f32 = 0.05;

/// Per-landmark removal probability for `prune_vertices`
pub const DEFAULT_VERTEX_CHANCE: f64 = 0.0;

/// Map configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Store edges in one direction only
    #[serde(default)]
    pub directed: bool,

    /// Emit a debug event for every graph mutation
    #[serde(default)]
    pub verbose: bool,

    /// Edge cost parameters
    #[serde(default)]
    pub cost: CostConfig,

    /// Pruning parameters
    #[serde(default)]
    pub pruning: PruningConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            directed: false,
            verbose: false,
            cost: CostConfig::default(),
            pruning: PruningConfig::default(),
        }
    }
}

/// Edge cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Cost of an edge with no accumulated penalty
    #[serde(default = "default_baseline")]
    pub baseline: f32,

    /// Symmetric step applied on every traversal outcome
    #[serde(default = "default_increment")]
    pub increment: f32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE_COST,
            increment: DEFAULT_COST_INCREMENT,
        }
    }
}

/// Pruning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PruningConfig {
    /// Minimum reliability score an edge must keep to survive pruning
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: f32,

    /// Probability of removing each non-current landmark
    #[serde(default = "default_vertex_chance")]
    pub vertex_chance: f64,

    /// Seed for the vertex pruning random source (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            vertex_chance: DEFAULT_VERTEX_CHANCE,
            seed: None,
        }
    }
}

fn default_baseline() -> f32 {
    DEFAULT_BASELINE_COST
}

fn default_increment() -> f32 {
    DEFAULT_COST_INCREMENT
}

fn default_edge_threshold() -> f32 {
    DEFAULT_EDGE_THRESHOLD
}

fn default_vertex_chance() -> f64 {
    DEFAULT_VERTEX_CHANCE
}
