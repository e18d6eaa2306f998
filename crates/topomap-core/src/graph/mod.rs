//! Reachability and path-finding over landmark adjacency
//!
//! Provides graph algorithms for planning navigation targets:
//! - BFS for the set of landmarks reachable from a start
//! - Dijkstra for cheapest paths under reliability-weighted edge costs
//! - Graph provider trait so the algorithms run on any adjacency source

pub mod bfs;
pub mod dijkstra;
pub mod traversal;
pub mod types;

pub use bfs::reachable_indices;
pub use dijkstra::{find_path, shortest_paths, ShortestPaths};
pub use traversal::{check_vertex, GraphProvider};
pub use types::{Edge, HopCost};
