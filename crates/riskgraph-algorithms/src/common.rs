//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Parallel edges collapse into one adjacency entry and self-loops are dropped,
/// so `successors`/`predecessors` are duplicate-free.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Undirected neighbourhood (union of successors and predecessors), sorted.
    /// Offsets into `und_neighbors`. Size = node_count + 1
    pub und_offsets: Vec<usize>,
    /// Contiguous array of neighbour indices
    pub und_neighbors: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Number of distinct nodes adjacent in either direction
    pub fn undirected_degree(&self, idx: usize) -> usize {
        self.und_offsets[idx + 1] - self.und_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Neighbours ignoring direction, sorted ascending by index
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.und_offsets[idx];
        let end = self.und_offsets[idx + 1];
        &self.und_neighbors[start..end]
    }

    /// `true` if `a` and `b` are adjacent ignoring direction
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Total number of directed (deduplicated) edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Build a view from `(source, target)` index pairs.
    ///
    /// Nodes are identified by `index_to_node`; edge endpoints are dense indices into it.
    pub fn from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize)]) -> Self {
        let node_count = index_to_node.len();
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for &(u, v) in edges {
            if u == v || u >= node_count || v >= node_count {
                continue;
            }
            outgoing[u].push(v);
            incoming[v].push(u);
        }

        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        Self::from_adjacency_list(node_count, index_to_node, node_to_index, outgoing, incoming)
    }

    /// Helper to create GraphView from adjacency lists
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        mut outgoing: Vec<Vec<usize>>,
        mut incoming: Vec<Vec<usize>>,
    ) -> Self {
        for list in outgoing.iter_mut().chain(incoming.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        let mut und_offsets = Vec::with_capacity(node_count + 1);
        let mut und_neighbors = Vec::new();

        out_offsets.push(0);
        in_offsets.push(0);
        und_offsets.push(0);
        for i in 0..node_count {
            out_targets.extend_from_slice(&outgoing[i]);
            out_offsets.push(out_targets.len());

            in_sources.extend_from_slice(&incoming[i]);
            in_offsets.push(in_sources.len());

            let mut merged: Vec<usize> = outgoing[i]
                .iter()
                .chain(incoming[i].iter())
                .copied()
                .collect();
            merged.sort_unstable();
            merged.dedup();
            und_neighbors.extend(merged);
            und_offsets.push(und_neighbors.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            und_offsets,
            und_neighbors,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// View over nodes `0..n` (ids equal indices)
    pub(crate) fn view(n: usize, edges: &[(usize, usize)]) -> GraphView {
        GraphView::from_edges((0..n as u64).collect(), edges)
    }

    #[test]
    fn test_csr_dedups_parallel_edges_and_drops_self_loops() {
        let v = view(3, &[(0, 1), (0, 1), (1, 1), (2, 0)]);
        assert_eq!(v.successors(0), &[1]);
        assert_eq!(v.successors(1), &[] as &[usize]);
        assert_eq!(v.predecessors(0), &[2]);
        assert_eq!(v.edge_count(), 2);
    }

    #[test]
    fn test_undirected_neighbors_merge_both_directions() {
        let v = view(3, &[(0, 1), (1, 0), (2, 0)]);
        assert_eq!(v.neighbors(0), &[1, 2]);
        assert_eq!(v.undirected_degree(0), 2);
        assert!(v.is_adjacent(2, 0));
        assert!(!v.is_adjacent(1, 2));
    }
}
