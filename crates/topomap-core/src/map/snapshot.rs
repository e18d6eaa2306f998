//! Serializable point-in-time copy of a map
//!
//! Snapshots are plain JSON. Loading one re-validates every map invariant,
//! so a hand-edited or truncated file is rejected instead of producing a
//! map with dangling edges.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::IxDyn;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bail_invalid;
use crate::config::MapConfig;
use crate::error::{Result, TopoMapError};
use crate::graph::Edge;
use crate::map::{Landmark, Position, TopologicalMap};
use crate::observation::{Observation, ObservationDigest};

/// Current snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Observation buffer in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl ObservationRecord {
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            shape: observation.shape().to_vec(),
            data: observation.iter().copied().collect(),
        }
    }

    pub fn into_observation(self) -> Result<Observation> {
        let expected = self
            .shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| {
                TopoMapError::invalid_value(
                    "observation shape",
                    format!("{:?} overflows the element count", self.shape),
                )
            })?;
        let actual = self.data.len();
        Observation::from_shape_vec(IxDyn(&self.shape), self.data).map_err(|_| {
            TopoMapError::invalid_value(
                "observation shape",
                format!("expected {} elements, found {}", expected, actual),
            )
        })
    }
}

/// One landmark slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    #[serde(default = "default_live")]
    pub live: bool,
    pub hash: ObservationDigest,
    #[serde(flatten)]
    pub observation: ObservationRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn default_live() -> bool {
    true
}

/// Serialized form of a `TopologicalMap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub config: MapConfig,
    pub current: usize,
    pub landmarks: Vec<LandmarkRecord>,
}

impl MapSnapshot {
    pub fn num_landmarks(&self) -> usize {
        self.landmarks.iter().filter(|l| l.live).count()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let content = self.to_json_pretty()?;
        fs::write(path, content)
            .map_err(|e| TopoMapError::io_operation("write snapshot", path.display(), e))
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| TopoMapError::io_operation("read snapshot", path.display(), e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl TopologicalMap {
    /// Capture the full map state
    pub fn snapshot(&self) -> MapSnapshot {
        let landmarks = self
            .landmarks
            .iter()
            .zip(&self.live)
            .zip(&self.adjacency)
            .map(|((landmark, &live), edges)| LandmarkRecord {
                live,
                hash: landmark.hash.clone(),
                observation: ObservationRecord::from_observation(&landmark.observation),
                position: landmark.position,
                edges: edges.clone(),
            })
            .collect();

        MapSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            created_at: Utc::now(),
            config: self.config.clone(),
            current: self.curr_landmark_idx,
            landmarks,
        }
    }

    /// Rebuild a map from a snapshot, rejecting any invariant violation
    pub fn from_snapshot(snapshot: MapSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_FORMAT_VERSION {
            bail_invalid!("snapshot version", snapshot.version);
        }
        if snapshot.landmarks.is_empty() {
            return Err(TopoMapError::MapEmpty);
        }
        snapshot.config.validate()?;

        let slots = snapshot.landmarks.len();
        let mut landmarks = Vec::with_capacity(slots);
        let mut live = Vec::with_capacity(slots);
        let mut adjacency = Vec::with_capacity(slots);

        for (index, record) in snapshot.landmarks.into_iter().enumerate() {
            for edge in &record.edges {
                if edge.to >= slots {
                    return Err(TopoMapError::InconsistentEdge {
                        from: index,
                        to: edge.to,
                    });
                }
            }

            let stored_hash = record.hash;
            let mut landmark = Landmark::new(record.observation.into_observation()?, record.position);
            if record.live && landmark.hash != stored_hash {
                warn!(
                    landmark = index,
                    stored = %stored_hash.short(),
                    computed = %landmark.hash.short(),
                    "snapshot hash mismatch, using recomputed hash"
                );
            }
            if !record.live {
                landmark.hash = stored_hash;
            }

            landmarks.push(landmark);
            live.push(record.live);
            adjacency.push(record.edges);
        }

        let map = Self {
            config: snapshot.config,
            landmarks,
            live,
            adjacency,
            curr_landmark_idx: snapshot.current,
        };
        map.check_invariants()?;
        Ok(map)
    }

    /// Write a snapshot of this map as JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        self.snapshot().save_json(path)
    }

    /// Load and validate a map from a JSON snapshot
    pub fn load_json(path: &Path) -> Result<Self> {
        Self::from_snapshot(MapSnapshot::load_json(path)?)
    }
}
