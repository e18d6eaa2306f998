use crate::error::{Result, TopoMapError};
use crate::graph::types::Edge;

/// Trait for providing graph adjacency to the path engine
pub trait GraphProvider {
    /// Number of vertex slots, including pruned ones
    fn slot_count(&self) -> usize;
    fn is_live(&self, index: usize) -> bool;
    fn outbound_edges(&self, index: usize) -> &[Edge];
}

/// A bare adjacency list where every slot is live
impl GraphProvider for [Vec<Edge>] {
    fn slot_count(&self) -> usize {
        self.len()
    }

    fn is_live(&self, index: usize) -> bool {
        index < self.len()
    }

    fn outbound_edges(&self, index: usize) -> &[Edge] {
        self.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reject indices that are out of range or pruned
pub fn check_vertex(provider: &(impl GraphProvider + ?Sized), index: usize) -> Result<()> {
    if index >= provider.slot_count() {
        return Err(TopoMapError::out_of_range(index, provider.slot_count()));
    }
    if !provider.is_live(index) {
        return Err(TopoMapError::tombstoned(index));
    }
    Ok(())
}
