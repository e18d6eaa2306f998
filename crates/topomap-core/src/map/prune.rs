use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::bail_invalid;
use crate::config::PruningConfig;
use crate::error::Result;
use crate::map::TopologicalMap;

/// Outcome of a combined edge + vertex pruning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub edges_removed: usize,
    pub vertices_removed: Vec<usize>,
}

/// Random source for vertex pruning: seeded when the config names a seed
pub fn pruning_rng(config: &PruningConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn check_chance(chance: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&chance) {
        bail_invalid!("vertex chance", chance);
    }
    Ok(())
}

impl TopologicalMap {
    /// Randomly tombstone landmarks other than the current one.
    ///
    /// Live non-current landmarks are visited in ascending index order and
    /// each consumes exactly one draw from `rng`, so a fixed seed always
    /// removes the same set. The current landmark is never eligible, which
    /// keeps at least one landmark alive.
    pub fn prune_vertices<R: Rng + ?Sized>(&mut self, chance: f64, rng: &mut R) -> Result<Vec<usize>> {
        check_chance(chance)?;

        let mut removed = Vec::new();
        for index in self.live_indices() {
            if index == self.curr_landmark_idx {
                continue;
            }
            let draw: f64 = rng.gen();
            if draw < chance {
                removed.push(index);
            }
        }

        self.tombstone(&removed);
        debug!(chance, removed = removed.len(), live = self.num_landmarks(), "pruned vertices");
        self.debug_check_invariants();
        Ok(removed)
    }

    /// Edge pruning followed by vertex pruning
    pub fn prune<R: Rng + ?Sized>(
        &mut self,
        threshold: f32,
        chance: f64,
        rng: &mut R,
    ) -> Result<PruneReport> {
        check_chance(chance)?;
        let edges_removed = self.prune_edges(threshold)?;
        let vertices_removed = self.prune_vertices(chance, rng)?;
        Ok(PruneReport {
            edges_removed,
            vertices_removed,
        })
    }

    /// Prune using the thresholds and seed from the map's configuration
    pub fn prune_with_config(&mut self) -> Result<PruneReport> {
        let pruning = self.config.pruning;
        let mut rng = pruning_rng(&pruning);
        self.prune(pruning.edge_threshold, pruning.vertex_chance, &mut rng)
    }

    /// Clear liveness and drop every edge touching `indices`
    fn tombstone(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        for &index in indices {
            self.live[index] = false;
            self.adjacency[index].clear();
            self.landmarks[index].release();
        }
        let live = &self.live;
        for edges in &mut self.adjacency {
            edges.retain(|e| live[e.to]);
        }
        if self.config.verbose {
            debug!(?indices, "tombstoned landmarks");
        }
    }
}
