//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected weighted topology for
//! algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected graph in Compressed Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice, once in the row of `u` and
/// once in the row of `v`. Rows are sorted by neighbor index. Self-loops are
/// kept out of the rows and tracked in `self_loops`; simple graphs have all
/// zeros there, coarse graphs produced by community aggregation do not.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights: aligned with `targets`
    pub weights: Vec<f64>,
    /// Self-loop weight per node
    pub self_loops: Vec<f64>,
}

impl GraphView {
    /// Build a view from an undirected edge list over dense indices.
    ///
    /// Repeated pairs are merged by summing their weights and `(u, u)` entries
    /// accumulate into the self-loop of `u`. Indices must be below
    /// `index_to_node.len()`.
    pub fn from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)]) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        let mut self_loops = vec![0.0; node_count];

        for &(u, v, w) in edges {
            if u == v {
                self_loops[u] += w;
            } else {
                rows[u].push((v, w));
                rows[v].push((u, w));
            }
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for mut row in rows {
            row.sort_by_key(|&(v, _)| v);
            for (v, w) in row {
                // Merge parallel entries into one
                if targets.len() > *offsets.last().unwrap_or(&0) && targets.last() == Some(&v) {
                    if let Some(last) = weights.last_mut() {
                        *last += w;
                    }
                } else {
                    targets.push(v);
                    weights.push(w);
                }
            }
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
            weights,
            self_loops,
        }
    }

    /// Number of distinct neighbors of a node (by index), self-loop excluded
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Get weights aligned with `neighbors(idx)`
    pub fn neighbor_weights(&self, idx: usize) -> &[f64] {
        &self.weights[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Iterate `(neighbor, weight)` pairs of a node
    pub fn edges(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors(idx)
            .iter()
            .copied()
            .zip(self.neighbor_weights(idx).iter().copied())
    }

    /// Weighted degree. A self-loop contributes twice its weight.
    pub fn weighted_degree(&self, idx: usize) -> f64 {
        self.neighbor_weights(idx).iter().sum::<f64>() + 2.0 * self.self_loops[idx]
    }

    /// Total edge weight `m`, each undirected edge and self-loop counted once
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum::<f64>() / 2.0 + self.self_loops.iter().sum::<f64>()
    }

    /// Number of undirected edges, self-loops excluded
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}
