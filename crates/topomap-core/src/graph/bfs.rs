use std::collections::VecDeque;

use crate::error::Result;
use crate::graph::traversal::{check_vertex, GraphProvider};

/// Every landmark reachable from `start` by following outbound edges,
/// including `start` itself, in ascending index order.
///
/// Edge costs are ignored; only connectivity matters.
pub fn reachable_indices(
    provider: &(impl GraphProvider + ?Sized),
    start: usize,
) -> Result<Vec<usize>> {
    check_vertex(provider, start)?;

    let mut visited = vec![false; provider.slot_count()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in provider.outbound_edges(current) {
            if !provider.is_live(edge.to) || visited[edge.to] {
                continue;
            }
            visited[edge.to] = true;
            queue.push_back(edge.to);
        }
    }

    Ok(visited
        .iter()
        .enumerate()
        .filter_map(|(index, &seen)| seen.then_some(index))
        .collect())
}
