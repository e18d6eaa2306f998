//! Topological landmark map
//!
//! An online-built graph of observation landmarks. The exploration loop
//! registers observations as landmarks, reports loop closures and traversal
//! outcomes, and queries neighbors, reachable sets and cheapest paths.
//!
//! Landmark indices are never reused. Pruned landmarks are tombstoned: the
//! slot stays, its liveness bit is cleared and its observation is released.

mod edges;
pub mod export;
mod prune;
pub mod records;
pub mod snapshot;


use ndarray::IxDyn;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MapConfig;
use crate::error::{Result, TopoMapError};
use crate::graph::{self, check_vertex, Edge, GraphProvider, ShortestPaths};
use crate::observation::{hash_observation, Observation, ObservationDigest};

pub use export::{DirectedGraph, GraphEdge, GraphNode};
pub use prune::{pruning_rng, PruneReport};
pub use records::{AcceptAll, ModeFilter, TraversalFilter, TraversalMode, TraversalRecord};
pub use snapshot::{LandmarkRecord, MapSnapshot, SNAPSHOT_FORMAT_VERSION};

/// Agent coordinates at the moment a landmark was registered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A registered observation acting as a graph vertex
#[derive(Debug, Clone)]
pub struct Landmark {
    observation: Observation,
    hash: ObservationDigest,
    position: Option<Position>,
}

impl Landmark {
    pub fn new(observation: Observation, position: Option<Position>) -> Self {
        let hash = hash_observation(&observation);
        Self {
            observation,
            hash,
            position,
        }
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn hash(&self) -> &ObservationDigest {
        &self.hash
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Drop the payload of a pruned landmark, keeping its hash for debugging
    fn release(&mut self) {
        self.observation = Observation::zeros(IxDyn(&[0]));
    }
}

/// Landmark graph with reliability-weighted edges
#[derive(Debug, Clone)]
pub struct TopologicalMap {
    config: MapConfig,
    landmarks: Vec<Landmark>,
    live: Vec<bool>,
    adjacency: Vec<Vec<Edge>>,
    curr_landmark_idx: usize,
}

impl TopologicalMap {
    /// Create a map holding only `initial_obs`, with default costs
    pub fn new(initial_obs: Observation, directed: bool) -> Self {
        let config = MapConfig {
            directed,
            ..MapConfig::default()
        };
        Self::from_parts(initial_obs, None, config)
    }

    /// Create a map from an explicit configuration
    pub fn with_config(initial_obs: Observation, config: MapConfig) -> Result<Self> {
        Self::with_config_at(initial_obs, None, config)
    }

    /// Like `with_config`, recording where the initial observation was taken
    pub fn with_config_at(
        initial_obs: Observation,
        position: Option<Position>,
        config: MapConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(initial_obs, position, config))
    }

    fn from_parts(initial_obs: Observation, position: Option<Position>, config: MapConfig) -> Self {
        let mut map = Self {
            config,
            landmarks: Vec::new(),
            live: Vec::new(),
            adjacency: Vec::new(),
            curr_landmark_idx: 0,
        };
        map.reset_at(initial_obs, position);
        map
    }

    /// Discard everything and start over from a single landmark
    pub fn reset(&mut self, obs: Observation) {
        self.reset_at(obs, None);
    }

    /// Like `reset`, recording where the initial observation was taken
    pub fn reset_at(&mut self, obs: Observation, position: Option<Position>) {
        self.landmarks = vec![Landmark::new(obs, position)];
        self.live = vec![true];
        self.adjacency = vec![Vec::new()];
        self.curr_landmark_idx = 0;
        if self.config.verbose {
            debug!(hash = %self.landmarks[0].hash.short(), "map reset");
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    pub fn curr_landmark_idx(&self) -> usize {
        self.curr_landmark_idx
    }

    pub fn curr_landmark(&self) -> &Landmark {
        &self.landmarks[self.curr_landmark_idx]
    }

    /// Live landmark at `index`
    pub fn landmark(&self, index: usize) -> Result<&Landmark> {
        self.check_live(index)?;
        Ok(&self.landmarks[index])
    }

    /// Number of live landmarks
    pub fn num_landmarks(&self) -> usize {
        self.live.iter().filter(|&&alive| alive).count()
    }

    /// Number of landmark slots ever allocated, pruned ones included
    pub fn num_slots(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }

    pub fn live_indices(&self) -> Vec<usize> {
        (0..self.live.len()).filter(|&i| self.live[i]).collect()
    }

    /// Live landmarks with their indices, in index order
    pub fn landmarks(&self) -> impl Iterator<Item = (usize, &Landmark)> {
        self.landmarks
            .iter()
            .enumerate()
            .filter(|(index, _)| self.live[*index])
    }

    /// Outbound adjacency of a live landmark
    pub fn neighbors(&self, index: usize) -> Result<&[Edge]> {
        self.check_live(index)?;
        Ok(&self.adjacency[index])
    }

    /// Total directed-edge count; an undirected edge counts twice
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Register a new observation and connect it from the current landmark
    pub fn add_landmark(&mut self, obs: Observation) -> usize {
        self.push_landmark(obs, None)
    }

    /// Like `add_landmark`, recording where the observation was taken
    pub fn add_landmark_at(&mut self, obs: Observation, position: Position) -> usize {
        self.push_landmark(obs, Some(position))
    }

    fn push_landmark(&mut self, obs: Observation, position: Option<Position>) -> usize {
        let landmark = Landmark::new(obs, position);
        let new_idx = self.landmarks.len();

        self.landmarks.push(landmark);
        self.live.push(true);
        self.adjacency.push(Vec::new());
        self.link(self.curr_landmark_idx, new_idx);

        if self.config.verbose {
            debug!(
                landmark = new_idx,
                hash = %self.landmarks[new_idx].hash.short(),
                "added new landmark"
            );
        }
        self.debug_check_invariants();
        new_idx
    }

    /// Move the current position to `index`, closing a loop if needed.
    ///
    /// If no edge leads from the current landmark to `index`, one is added
    /// before switching.
    pub fn set_curr_landmark(&mut self, index: usize) -> Result<()> {
        self.check_live(index)?;
        if index == self.curr_landmark_idx {
            return Ok(());
        }

        if !self.has_edge(self.curr_landmark_idx, index) {
            if self.config.verbose {
                debug!(from = self.curr_landmark_idx, to = index, "loop closure");
            }
            self.link(self.curr_landmark_idx, index);
        }

        if self.config.verbose {
            debug!(landmark = index, "change current landmark");
        }
        self.curr_landmark_idx = index;
        self.debug_check_invariants();
        Ok(())
    }

    /// The current landmark and its direct successors, ascending
    pub fn neighbor_indices(&self) -> Vec<usize> {
        let mut neighbors: Vec<usize> = std::iter::once(self.curr_landmark_idx)
            .chain(self.adjacency[self.curr_landmark_idx].iter().map(|e| e.to))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Live landmarks that are not in `neighbor_indices`, ascending
    pub fn non_neighbor_indices(&self) -> Vec<usize> {
        let neighbors = self.neighbor_indices();
        self.live_indices()
            .into_iter()
            .filter(|i| neighbors.binary_search(i).is_err())
            .collect()
    }

    /// Landmarks reachable from `start`, including `start`
    pub fn reachable_indices(&self, start: usize) -> Result<Vec<usize>> {
        graph::reachable_indices(self, start)
    }

    /// Reliability-weighted distances and predecessors from `start`
    pub fn shortest_paths(&self, start: usize) -> Result<ShortestPaths> {
        graph::shortest_paths(self, start)
    }

    /// Cheapest known route from `from` to `to`, or `None` if unreachable
    pub fn get_path(&self, from: usize, to: usize) -> Result<Option<Vec<usize>>> {
        let path = graph::find_path(self, from, to)?;
        debug!(from, to, hops = path.as_ref().map(|p| p.len().saturating_sub(1)), "get_path");
        Ok(path)
    }

    fn check_live(&self, index: usize) -> Result<()> {
        check_vertex(self, index)
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency[from].iter().any(|e| e.to == to)
    }

    /// Insert `from -> to` (and the reverse when undirected) if missing.
    /// Callers validate indices.
    fn link(&mut self, from: usize, to: usize) {
        let costs = self.config.cost;
        if !self.has_edge(from, to) {
            self.adjacency[from].push(Edge::new(to, &costs));
        }
        if !self.config.directed && !self.has_edge(to, from) {
            self.adjacency[to].push(Edge::new(from, &costs));
        }
        if self.config.verbose {
            let kind = if self.config.directed { "dir." } else { "und." };
            debug!(from, to, kind, "new edge");
        }
    }

    /// Verify every structural invariant of the map
    pub fn check_invariants(&self) -> Result<()> {
        if self.landmarks.len() != self.adjacency.len() || self.live.len() != self.adjacency.len()
        {
            return Err(TopoMapError::Other(format!(
                "landmark/adjacency length mismatch: {} landmarks, {} adjacency lists",
                self.landmarks.len(),
                self.adjacency.len()
            )));
        }
        if self.num_landmarks() == 0 {
            return Err(TopoMapError::MapEmpty);
        }
        self.check_live(self.curr_landmark_idx)?;

        let baseline = self.config.cost.baseline;
        for (from, edges) in self.adjacency.iter().enumerate() {
            for (position, edge) in edges.iter().enumerate() {
                if !self.live[from] || !self.is_live(edge.to) || edge.to == from {
                    return Err(TopoMapError::InconsistentEdge { from, to: edge.to });
                }
                if edges[..position].iter().any(|e| e.to == edge.to) {
                    return Err(TopoMapError::InconsistentEdge { from, to: edge.to });
                }
                if !edge.cost.is_finite() || edge.cost.value() < baseline {
                    return Err(TopoMapError::invalid_value("edge cost", edge.cost.value()));
                }
                if !self.config.directed {
                    let mirrored = self.adjacency[edge.to]
                        .iter()
                        .find(|e| e.to == from)
                        .is_some_and(|e| e.cost == edge.cost);
                    if !mirrored {
                        return Err(TopoMapError::InconsistentEdge { from, to: edge.to });
                    }
                }
            }
        }
        Ok(())
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "map invariant violated: {:?}",
            self.check_invariants()
        );
    }
}

impl GraphProvider for TopologicalMap {
    fn slot_count(&self) -> usize {
        self.landmarks.len()
    }

    fn is_live(&self, index: usize) -> bool {
        TopologicalMap::is_live(self, index)
    }

    fn outbound_edges(&self, index: usize) -> &[Edge] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}
