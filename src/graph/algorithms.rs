//! Graph algorithms for analysis

use std::cmp::Reverse;

use itertools::Itertools;

use crate::graph::{NodeId, SocialGraph};

/// Rank nodes by degree (descending), ties broken by ascending node id
pub fn rank_by_degree(graph: &SocialGraph) -> Vec<(NodeId, usize)> {
    (0..graph.node_count())
        .map(|idx| (graph.node_id(idx), graph.degree_at(idx)))
        .sorted_by_key(|&(id, degree)| (Reverse(degree), id))
        .collect()
}

/// Most connected nodes, used to highlight influential users in reports
pub fn top_nodes_by_degree(graph: &SocialGraph, n: usize) -> Vec<NodeId> {
    log::info!("Selecting top {} nodes by degree", n);

    rank_by_degree(graph)
        .into_iter()
        .take(n)
        .map(|(id, _)| id)
        .collect()
}
