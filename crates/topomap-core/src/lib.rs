//! Topomap Core Library
//!
//! Topological navigation map for exploring agents: landmarks registered
//! from observations, edges weighted by how reliably they can be traversed,
//! and reachability / cheapest-path queries for picking navigation targets.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod map;
pub mod observation;
pub mod session;

pub use error::{Result, TopoMapError};
pub use map::{Landmark, Position, TopologicalMap};
pub use observation::{hash_observation, Observation, ObservationDigest};
