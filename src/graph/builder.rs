//! Graph construction module

use std::collections::{BTreeSet, HashMap};

use crate::error::{AnalysisError, Result};
use crate::graph::{NodeId, SocialGraph};

/// Builder for incrementally constructing a SocialGraph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from node ids to insertion indices
    id_to_index: HashMap<NodeId, u32>,

    /// Node ids in insertion order
    node_ids: Vec<NodeId>,

    /// Adjacency sets for each node
    adjacency: Vec<BTreeSet<u32>>,

    /// Number of distinct undirected edges
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Get or create the insertion index for the given node id
    fn get_or_create_node(&mut self, id: NodeId) -> u32 {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id, idx);
        self.node_ids.push(id);
        self.adjacency.push(BTreeSet::new());

        idx
    }

    /// Add an undirected edge.
    ///
    /// Returns `true` if the edge was new. Re-adding an edge in either
    /// orientation is a no-op; self-loops are rejected.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        if u == v {
            return Err(AnalysisError::InvalidEdge { node: u });
        }

        let u_idx = self.get_or_create_node(u);
        let v_idx = self.get_or_create_node(v);

        let inserted = self.adjacency[u_idx as usize].insert(v_idx);
        if inserted {
            self.adjacency[v_idx as usize].insert(u_idx);
            self.edge_count += 1;
        }

        Ok(inserted)
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Freeze into a compressed graph with nodes reindexed by ascending id
    pub fn build(self) -> SocialGraph {
        let node_count = self.node_ids.len();

        let mut order: Vec<usize> = (0..node_count).collect();
        order.sort_unstable_by_key(|&idx| self.node_ids[idx]);

        let mut old_to_new = vec![0u32; node_count];
        for (new_idx, &old_idx) in order.iter().enumerate() {
            old_to_new[old_idx] = new_idx as u32;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut edges = Vec::with_capacity(self.edge_count * 2);
        offsets.push(0);

        for &old_idx in &order {
            let start = edges.len();
            edges.extend(self.adjacency[old_idx].iter().map(|&n| old_to_new[n as usize]));
            edges[start..].sort_unstable();
            offsets.push(edges.len() as u32);
        }

        let node_ids = order.iter().map(|&idx| self.node_ids[idx]).collect();

        log::debug!(
            "Built graph with {} nodes and {} edges",
            node_count,
            self.edge_count
        );

        SocialGraph::from_parts(offsets, edges, node_ids)
    }
}
