use tracing::debug;

use crate::bail_invalid;
use crate::error::{Result, TopoMapError};
use crate::graph::{Edge, HopCost};
use crate::map::TopologicalMap;

impl TopologicalMap {
    /// Edge `from -> to`, if present
    pub fn edge(&self, from: usize, to: usize) -> Option<&Edge> {
        self.adjacency.get(from)?.iter().find(|e| e.to == to)
    }

    /// Reliability score of `from -> to` in (0, 1]
    pub fn edge_reliability(&self, from: usize, to: usize) -> Option<f32> {
        self.edge(from, to)
            .map(|e| e.reliability(&self.config.cost))
    }

    /// Connect two live landmarks, respecting directedness.
    ///
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_live(from)?;
        self.check_live(to)?;
        if from == to {
            bail_invalid!("edge", format!("self-loop on landmark {}", from));
        }

        let exists = self.has_edge(from, to) && (self.config.directed || self.has_edge(to, from));
        if exists {
            return Ok(false);
        }
        self.link(from, to);
        self.debug_check_invariants();
        Ok(true)
    }

    /// Delete `from -> to` (both directions when undirected).
    ///
    /// Missing edges are not an error; returns whether anything was removed.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_live(from)?;
        self.check_live(to)?;

        let mut removed = self.remove_directed(from, to);
        if !self.config.directed {
            removed |= self.remove_directed(to, from);
        }
        if removed && self.config.verbose {
            debug!(from, to, "removed edge");
        }
        self.debug_check_invariants();
        Ok(removed)
    }

    /// Record one attempted traversal of `from -> to` and return the new cost.
    ///
    /// Failure raises the cost by the configured increment, success lowers
    /// it by the same amount down to the baseline. Undirected maps update
    /// both directions together.
    pub fn update_edge_traversal(&mut self, from: usize, to: usize, success: bool) -> Result<HopCost> {
        self.check_live(from)?;
        self.check_live(to)?;

        let forward = self.edge_position(from, to)?;
        let backward = if self.config.directed {
            None
        } else {
            Some(
                self.edge_position(to, from)
                    .map_err(|_| TopoMapError::InconsistentEdge { from: to, to: from })?,
            )
        };

        let costs = self.config.cost;
        let edge = &mut self.adjacency[from][forward];
        edge.record_outcome(success, &costs);
        let updated = edge.clone();
        if let Some(backward) = backward {
            let reverse = &mut self.adjacency[to][backward];
            reverse.cost = updated.cost;
            reverse.successes = updated.successes;
            reverse.failures = updated.failures;
        }

        debug!(
            from,
            to,
            success,
            cost = updated.cost.value(),
            "edge traversal"
        );
        self.debug_check_invariants();
        Ok(updated.cost)
    }

    /// Remove every edge whose reliability score is below `threshold`.
    ///
    /// Landmarks left without edges stay in the map. Returns the number of
    /// directed entries removed.
    pub fn prune_edges(&mut self, threshold: f32) -> Result<usize> {
        if !(0.0..=1.0).contains(&threshold) {
            bail_invalid!("edge threshold", threshold);
        }

        let costs = self.config.cost;
        let doomed: Vec<(usize, usize)> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| {
                edges
                    .iter()
                    .filter(|e| e.reliability(&costs) < threshold)
                    .map(move |e| (from, e.to))
            })
            .collect();

        for &(from, to) in &doomed {
            self.remove_directed(from, to);
        }

        debug!(threshold, removed = doomed.len(), "pruned edges");
        self.debug_check_invariants();
        Ok(doomed.len())
    }

    fn edge_position(&self, from: usize, to: usize) -> Result<usize> {
        self.adjacency[from]
            .iter()
            .position(|e| e.to == to)
            .ok_or(TopoMapError::EdgeNotFound { from, to })
    }

    fn remove_directed(&mut self, from: usize, to: usize) -> bool {
        let edges = &mut self.adjacency[from];
        let before = edges.len();
        edges.retain(|e| e.to != to);
        edges.len() != before
    }
}
