//! Read-only graph export for visualization tooling

use std::fmt::Write;

use serde::Serialize;

use crate::map::{Position, TopologicalMap};

/// A live landmark as a graph node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub index: usize,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub current: bool,
}

/// One adjacency entry as a directed graph edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub cost: f32,
    pub reliability: f32,
}

/// Directed-graph copy of a map. Undirected maps contribute both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectedGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DirectedGraph {
    /// Render as Graphviz DOT. Nodes with a position get a pinned `pos`.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph topomap {\n");
        for node in &self.nodes {
            let _ = write!(out, "  {} [label=\"{}\\n{}\"", node.index, node.index, node.hash);
            if let Some(pos) = node.position {
                let _ = write!(out, ", pos=\"{},{}!\"", pos.x, pos.y);
            }
            if node.current {
                out.push_str(", style=bold");
            }
            out.push_str("];\n");
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "  {} -> {} [label=\"{:.2}\", weight={:.3}];",
                edge.from, edge.to, edge.cost, edge.reliability
            );
        }
        out.push_str("}\n");
        out
    }
}

impl TopologicalMap {
    /// Snapshot the current adjacency as a generic directed graph
    pub fn to_digraph(&self) -> DirectedGraph {
        let costs = self.config.cost;
        let nodes = self
            .landmarks()
            .map(|(index, landmark)| GraphNode {
                index,
                hash: landmark.hash().short().to_string(),
                position: landmark.position(),
                current: index == self.curr_landmark_idx,
            })
            .collect();

        let edges = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| {
                edges.iter().map(move |e| GraphEdge {
                    from,
                    to: e.to,
                    cost: e.cost.value(),
                    reliability: e.reliability(&costs),
                })
            })
            .collect();

        DirectedGraph { nodes, edges }
    }
}
