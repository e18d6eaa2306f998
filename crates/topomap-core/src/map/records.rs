//! Traversal records and the filters that decide which ones reach the map

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, TopoMapError};
use crate::map::TopologicalMap;

/// What the agent was doing when a traversal was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Looking for new landmarks and edges
    #[default]
    Exploration,
    /// Moving between known landmarks along the graph
    Locomotion,
    /// Exploring while idling to collect distance-metric samples
    IdleExploration,
}

impl TraversalMode {
    pub const ALL: [TraversalMode; 3] = [
        TraversalMode::Exploration,
        TraversalMode::Locomotion,
        TraversalMode::IdleExploration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraversalMode::Exploration => "exploration",
            TraversalMode::Locomotion => "locomotion",
            TraversalMode::IdleExploration => "idle_exploration",
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraversalMode {
    type Err = TopoMapError;

    fn from_str(s: &str) -> Result<Self> {
        TraversalMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s.to_lowercase())
            .ok_or_else(|| TopoMapError::invalid_value("traversal mode", s))
    }
}

/// One attempted move between two landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalRecord {
    pub from: usize,
    pub to: usize,
    pub success: bool,
    #[serde(default)]
    pub mode: TraversalMode,
}

impl TraversalRecord {
    pub fn new(from: usize, to: usize, success: bool, mode: TraversalMode) -> Self {
        Self {
            from,
            to,
            success,
            mode,
        }
    }
}

/// Decides whether a traversal record should be ignored
pub trait TraversalFilter {
    fn skip(&self, record: &TraversalRecord) -> bool;
}

/// Applies every record
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl TraversalFilter for AcceptAll {
    fn skip(&self, _record: &TraversalRecord) -> bool {
        false
    }
}

/// Applies only records taken in one of the listed modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeFilter {
    modes: Vec<TraversalMode>,
}

impl ModeFilter {
    pub fn new(modes: impl IntoIterator<Item = TraversalMode>) -> Self {
        Self {
            modes: modes.into_iter().collect(),
        }
    }

    pub fn exploration_only() -> Self {
        Self::new([TraversalMode::Exploration])
    }
}

impl TraversalFilter for ModeFilter {
    fn skip(&self, record: &TraversalRecord) -> bool {
        !self.modes.contains(&record.mode)
    }
}

impl<F> TraversalFilter for F
where
    F: Fn(&TraversalRecord) -> bool,
{
    fn skip(&self, record: &TraversalRecord) -> bool {
        self(record)
    }
}

impl TopologicalMap {
    /// Apply a traversal record unless `filter` skips it.
    ///
    /// Indices are validated either way. Returns whether the edge cost was
    /// updated.
    pub fn record_traversal(
        &mut self,
        record: &TraversalRecord,
        filter: &dyn TraversalFilter,
    ) -> Result<bool> {
        self.check_live(record.from)?;
        self.check_live(record.to)?;

        if filter.skip(record) {
            trace!(from = record.from, to = record.to, mode = %record.mode, "skipped traversal");
            return Ok(false);
        }
        self.update_edge_traversal(record.from, record.to, record.success)?;
        Ok(true)
    }
}
