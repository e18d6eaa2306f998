use serde::{Deserialize, Serialize};

use crate::config::CostConfig;

/// Represents the cost of traversing a single edge, in hop units.
///
/// A fresh edge costs the configured baseline (one hop by default); failed
/// traversals make it more expensive, successful ones bring it back down.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HopCost(f32);

impl HopCost {
    pub const DEFAULT: HopCost = HopCost(1.0);
    pub const ZERO: HopCost = HopCost(0.0);
    pub const INFINITE: HopCost = HopCost(f32::INFINITY);

    pub fn new(cost: f32) -> Self {
        HopCost(cost)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Total order over costs, used by the shortest-path heap
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for HopCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::Add for HopCost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        HopCost(self.0 + other.0)
    }
}

/// One adjacency entry: the target landmark and the reliability statistics
/// of the transition leading to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: usize,
    pub cost: HopCost,
    #[serde(default)]
    pub successes: u32,
    #[serde(default)]
    pub failures: u32,
}

impl Edge {
    /// A fresh edge at baseline cost
    pub fn new(to: usize, costs: &CostConfig) -> Self {
        Self {
            to,
            cost: HopCost::new(costs.baseline),
            successes: 0,
            failures: 0,
        }
    }

    /// Apply one traversal outcome.
    ///
    /// Failure adds `increment`; success subtracts it, never going below
    /// `baseline`.
    pub fn record_outcome(&mut self, success: bool, costs: &CostConfig) {
        if success {
            self.successes = self.successes.saturating_add(1);
            self.cost = HopCost::new((self.cost.value() - costs.increment).max(costs.baseline));
        } else {
            self.failures = self.failures.saturating_add(1);
            self.cost = HopCost::new(self.cost.value() + costs.increment);
        }
    }

    /// Reliability score in (0, 1]: `baseline / cost`
    pub fn reliability(&self, costs: &CostConfig) -> f32 {
        (costs.baseline / self.cost.value()).clamp(0.0, 1.0)
    }
}
