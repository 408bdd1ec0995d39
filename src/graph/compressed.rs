//! Memory-efficient undirected graph representation

use std::collections::HashMap;
use std::mem;

use crate::error::{AnalysisError, Result};
use crate::graph::NodeId;

/// Compressed sparse representation of an undirected social graph.
///
/// Every undirected edge is stored in both adjacency rows. Dense indices are
/// assigned in ascending node-id order and every row is sorted, so iterating
/// indices (or a row) always visits nodes in ascending id order.
#[derive(Debug, Clone)]
pub struct SocialGraph {
    /// Number of nodes in the graph
    node_count: usize,

    /// Number of undirected edges
    edge_count: usize,

    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    offsets: Vec<u32>,

    /// Concatenated, sorted neighbor lists
    edges: Vec<u32>,

    /// Original node id for each dense index (ascending)
    node_ids: Vec<NodeId>,

    /// Reverse lookup from original node id to dense index
    index: HashMap<NodeId, u32>,
}

impl SocialGraph {
    /// Assemble a graph from already sorted CSR parts
    pub(crate) fn from_parts(
        offsets: Vec<u32>,
        edges: Vec<u32>,
        node_ids: Vec<NodeId>,
    ) -> Self {
        let index = node_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx as u32))
            .collect();

        Self {
            node_count: node_ids.len(),
            edge_count: edges.len() / 2,
            offsets,
            edges,
            node_ids,
            index,
        }
    }

    /// Build a graph from an edge iterator
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut builder = crate::graph::GraphBuilder::new();
        for (u, v) in edges {
            builder.add_edge(u, v)?;
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node ids in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids.iter().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Dense index of a node id
    pub fn index_of(&self, node: NodeId) -> Result<usize> {
        self.index
            .get(&node)
            .map(|&idx| idx as usize)
            .ok_or(AnalysisError::UserNotFound { node })
    }

    /// Original node id at a dense index
    pub fn node_id(&self, idx: usize) -> NodeId {
        self.node_ids[idx]
    }

    /// Neighbor indices of the node at a dense index
    pub fn neighbor_indices(&self, idx: usize) -> &[u32] {
        let start = self.offsets[idx] as usize;
        let end = self.offsets[idx + 1] as usize;
        &self.edges[start..end]
    }

    /// Degree of the node at a dense index
    pub fn degree_at(&self, idx: usize) -> usize {
        (self.offsets[idx + 1] - self.offsets[idx]) as usize
    }

    /// Neighbors of a node, in ascending id order
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = NodeId> + '_> {
        let idx = self.index_of(node)?;
        Ok(self
            .neighbor_indices(idx)
            .iter()
            .map(move |&n| self.node_ids[n as usize]))
    }

    pub fn degree(&self, node: NodeId) -> Result<usize> {
        Ok(self.degree_at(self.index_of(node)?))
    }

    /// Check if an undirected edge exists between two nodes
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        match (self.index.get(&u), self.index.get(&v)) {
            (Some(&u_idx), Some(&v_idx)) => self
                .neighbor_indices(u_idx as usize)
                .binary_search(&v_idx)
                .is_ok(),
            _ => false,
        }
    }

    /// Each undirected edge once, as (smaller id, larger id)
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.node_count).flat_map(move |src| {
            self.neighbor_indices(src)
                .iter()
                .filter(move |&&dst| (dst as usize) > src)
                .map(move |&dst| (self.node_ids[src], self.node_ids[dst as usize]))
        })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.capacity() * mem::size_of::<NodeId>();
        let index = self.index.capacity() * (mem::size_of::<NodeId>() + mem::size_of::<u32>());

        base + offsets + edges + ids + index
    }
}
