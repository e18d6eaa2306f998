//! CLI commands for topomap

pub mod dispatch;
pub mod export;
pub mod path;
pub mod prune;
pub mod reachable;
pub mod replay;
pub mod stats;
