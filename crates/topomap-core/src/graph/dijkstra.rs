use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::error::Result;
use crate::graph::traversal::{check_vertex, GraphProvider};
use crate::graph::types::HopCost;
use crate::trace_time;

/// Wrapper for BinaryHeap to use as min-heap (ordered by accumulated cost,
/// then by landmark index so ties settle the lowest index first)
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub index: usize,
    pub accumulated_cost: HopCost,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.accumulated_cost
            .total_cmp(&other.accumulated_cost)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Single-source shortest path result.
///
/// Both vectors are indexed by landmark slot. Unreachable and pruned slots
/// have infinite distance and no predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub start: usize,
    pub distances: Vec<HopCost>,
    pub predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn distance(&self, to: usize) -> Option<HopCost> {
        self.distances.get(to).copied().filter(HopCost::is_finite)
    }

    /// Walk predecessors back from `to`. `None` if `to` was never reached.
    pub fn path_to(&self, to: usize) -> Option<Vec<usize>> {
        if to == self.start {
            return Some(vec![to]);
        }
        self.predecessors.get(to).copied().flatten()?;

        let mut path = vec![to];
        let mut current = to;
        while current != self.start {
            current = self.predecessors[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra over edge costs, `O((V + E) log V)` with a binary heap.
///
/// Stale heap entries are skipped on pop rather than decreased in place.
/// Relaxation only accepts strict improvements, so among equal-cost routes
/// the predecessor settled first is kept.
pub fn shortest_paths(
    provider: &(impl GraphProvider + ?Sized),
    start: usize,
) -> Result<ShortestPaths> {
    check_vertex(provider, start)?;
    let query_start = Instant::now();

    let slots = provider.slot_count();
    let mut distances = vec![HopCost::INFINITE; slots];
    let mut predecessors = vec![None; slots];
    let mut settled = vec![false; slots];
    let mut heap = BinaryHeap::new();

    distances[start] = HopCost::ZERO;
    heap.push(Reverse(HeapEntry {
        index: start,
        accumulated_cost: HopCost::ZERO,
    }));

    while let Some(Reverse(entry)) = heap.pop() {
        if settled[entry.index] {
            continue;
        }
        settled[entry.index] = true;

        for edge in provider.outbound_edges(entry.index) {
            if !provider.is_live(edge.to) || settled[edge.to] {
                continue;
            }
            let candidate = entry.accumulated_cost + edge.cost;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(entry.index);
                heap.push(Reverse(HeapEntry {
                    index: edge.to,
                    accumulated_cost: candidate,
                }));
            }
        }
    }

    trace_time!(query_start, "shortest_paths", start_idx = start);

    Ok(ShortestPaths {
        start,
        distances,
        predecessors,
    })
}

/// Cheapest path from `from` to `to`, inclusive of both endpoints
pub fn find_path(
    provider: &(impl GraphProvider + ?Sized),
    from: usize,
    to: usize,
) -> Result<Option<Vec<usize>>> {
    check_vertex(provider, to)?;
    let paths = shortest_paths(provider, from)?;
    Ok(paths.path_to(to))
}
