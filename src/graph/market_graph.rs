//! Directed multigraph of cointegration relationships.

use crate::graph::Edge;
use petgraph::graph::{Graph, NodeIndex};
use std::collections::HashMap;

/// Weighted directed multigraph over ticker symbols.
///
/// Parallel edges between the same ordered pair are preserved, never
/// merged or summed. Construction accepts floored-out (zero weight)
/// triples as no-ops: they add neither an edge nor their endpoint
/// nodes, so the node set is exactly the tickers incident to a
/// surviving edge.
#[derive(Debug, Clone, Default)]
pub struct MarketGraph {
    /// Internal petgraph representation.
    pub graph: Graph<String, f64>,
    symbol_to_node: HashMap<String, NodeIndex>,
}

impl MarketGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a normalized edge list.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            if edge.survives_floor() {
                graph.add_edge(&edge.source, &edge.target, edge.floored_weight);
            }
        }
        graph
    }

    /// Add a node, idempotently.
    pub fn add_node(&mut self, symbol: &str) -> NodeIndex {
        if let Some(&idx) = self.symbol_to_node.get(symbol) {
            return idx;
        }
        let idx = self.graph.add_node(symbol.to_string());
        self.symbol_to_node.insert(symbol.to_string(), idx);
        idx
    }

    /// Add a directed weighted edge. Parallel edges accumulate as
    /// distinct edges.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(from_idx, to_idx, weight);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbol_to_node.contains_key(symbol)
    }

    pub fn node_index(&self, symbol: &str) -> Option<NodeIndex> {
        self.symbol_to_node.get(symbol).copied()
    }

    /// Symbols in node insertion order.
    pub fn symbols(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i).cloned())
            .collect()
    }

    /// All parallel edge weights from one symbol to another, in
    /// insertion order.
    pub fn edge_weights_between(&self, from: &str, to: &str) -> Vec<f64> {
        let (from_idx, to_idx) = match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Vec::new(),
        };
        // petgraph iterates a node's edges newest-first; reverse to get
        // insertion order.
        let mut weights: Vec<f64> = self
            .graph
            .edges_connecting(from_idx, to_idx)
            .map(|e| *e.weight())
            .collect();
        weights.reverse();
        weights
    }

    /// Endpoint indices and weight of every edge.
    pub fn edge_list(&self) -> Vec<(NodeIndex, NodeIndex, f64)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let w = *self.graph.edge_weight(e)?;
                Some((a, b, w))
            })
            .collect()
    }
}
