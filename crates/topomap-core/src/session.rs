//! Replay of recorded exploration sessions
//!
//! A session log is newline-delimited JSON, one `SessionEvent` per line,
//! in the order the exploration loop issued them. The first event must be
//! a `reset`, which creates the map.

use std::io::BufRead;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MapConfig;
use crate::error::{Result, TopoMapError};
use crate::map::snapshot::ObservationRecord;
use crate::map::{Position, TopologicalMap, TraversalFilter, TraversalMode, TraversalRecord};

/// One call made by the exploration loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Reset {
        #[serde(flatten)]
        observation: ObservationRecord,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    AddLandmark {
        #[serde(flatten)]
        observation: ObservationRecord,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    SetCurrent {
        index: usize,
    },
    AddEdge {
        from: usize,
        to: usize,
    },
    Traversal {
        from: usize,
        to: usize,
        success: bool,
        #[serde(default)]
        mode: TraversalMode,
    },
    RemoveEdge {
        from: usize,
        to: usize,
    },
    PruneEdges {
        threshold: f32,
    },
    PruneVertices {
        chance: f64,
        seed: u64,
    },
}

/// Counters collected while replaying a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub events: usize,
    pub landmarks_added: usize,
    pub traversals_applied: usize,
    pub traversals_skipped: usize,
    pub edges_pruned: usize,
    pub vertices_pruned: usize,
}

/// Applies session events to a map
pub struct SessionReplayer<'a> {
    config: MapConfig,
    filter: &'a dyn TraversalFilter,
    map: Option<TopologicalMap>,
    stats: ReplayStats,
}

impl<'a> SessionReplayer<'a> {
    pub fn new(config: MapConfig, filter: &'a dyn TraversalFilter) -> Self {
        Self {
            config,
            filter,
            map: None,
            stats: ReplayStats::default(),
        }
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn map(&self) -> Option<&TopologicalMap> {
        self.map.as_ref()
    }

    /// Consume the replayer, returning the map. Fails if no `reset` was seen.
    pub fn finish(self) -> Result<(TopologicalMap, ReplayStats)> {
        let map = self.map.ok_or(TopoMapError::MapEmpty)?;
        Ok((map, self.stats))
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<()> {
        self.stats.events += 1;

        match event {
            SessionEvent::Reset {
                observation,
                position,
            } => {
                let observation = observation.into_observation()?;
                match self.map.as_mut() {
                    Some(map) => map.reset_at(observation, position),
                    None => {
                        let config = self.config.clone();
                        self.map = Some(TopologicalMap::with_config_at(observation, position, config)?);
                    }
                }
            }
            SessionEvent::AddLandmark {
                observation,
                position,
            } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                let observation = observation.into_observation()?;
                let expected = map.curr_landmark().observation().shape();
                if observation.shape() != expected {
                    return Err(TopoMapError::invalid_value(
                        "observation shape",
                        format!("expected {:?}, found {:?}", expected, observation.shape()),
                    ));
                }
                match position {
                    Some(position) => map.add_landmark_at(observation, position),
                    None => map.add_landmark(observation),
                };
                self.stats.landmarks_added += 1;
            }
            SessionEvent::SetCurrent { index } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                map.set_curr_landmark(index)?;
            }
            SessionEvent::AddEdge { from, to } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                map.add_edge(from, to)?;
            }
            SessionEvent::Traversal {
                from,
                to,
                success,
                mode,
            } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                let record = TraversalRecord::new(from, to, success, mode);
                if map.record_traversal(&record, self.filter)? {
                    self.stats.traversals_applied += 1;
                } else {
                    self.stats.traversals_skipped += 1;
                }
            }
            SessionEvent::RemoveEdge { from, to } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                map.remove_edge(from, to)?;
            }
            SessionEvent::PruneEdges { threshold } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                self.stats.edges_pruned += map.prune_edges(threshold)?;
            }
            SessionEvent::PruneVertices { chance, seed } => {
                let map = self.map.as_mut().ok_or(TopoMapError::MapEmpty)?;
                let mut rng = StdRng::seed_from_u64(seed);
                self.stats.vertices_pruned += map.prune_vertices(chance, &mut rng)?.len();
            }
        }
        Ok(())
    }

    /// Apply every event in a newline-delimited JSON log. Blank lines are
    /// ignored; errors name the offending line.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: SessionEvent = serde_json::from_str(&line).map_err(|e| {
                TopoMapError::invalid_value(&format!("session event on line {}", line_no + 1), e)
            })?;
            self.apply(event).map_err(|e| {
                debug!(line = line_no + 1, error = %e, "replay failed");
                e
            })?;
        }
        Ok(())
    }
}
