//! Community statistics and metrics

use std::cmp::Reverse;
use std::collections::HashSet;

use itertools::Itertools;

use crate::cluster::{Community, Partition};
use crate::error::Result;
use crate::graph::{NodeId, SocialGraph};

/// Modularity of a partition.
///
/// Computed per community as `L_c / m - (d_c / 2m)^2`, where `L_c` is the
/// number of internal edges and `d_c` the total degree of its members.
/// An edgeless graph has modularity 0.
pub fn modularity(graph: &SocialGraph, partition: &Partition) -> Result<f64> {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return Ok(0.0);
    }

    let count = partition.community_count();
    let mut internal = vec![0usize; count];
    let mut degree_sums = vec![0usize; count];

    let labels = graph
        .nodes()
        .map(|node| partition.community_of(node))
        .collect::<Result<Vec<_>>>()?;

    for (idx, &community) in labels.iter().enumerate() {
        degree_sums[community] += graph.degree_at(idx);
        for &neighbor in graph.neighbor_indices(idx) {
            let neighbor = neighbor as usize;
            if neighbor > idx && labels[neighbor] == community {
                internal[community] += 1;
            }
        }
    }

    Ok(internal
        .iter()
        .zip(&degree_sums)
        .map(|(&l, &d)| {
            let share = d as f64 / (2.0 * m);
            l as f64 / m - share * share
        })
        .sum())
}

/// Density of an undirected community (internal edges / potential edges)
pub fn calculate_density(graph: &SocialGraph, members: &[NodeId]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    let member_set: HashSet<NodeId> = members.iter().copied().collect();
    let mut endpoints = 0;
    for &node in members {
        if let Ok(neighbors) = graph.neighbors(node) {
            endpoints += neighbors.filter(|n| member_set.contains(n)).count();
        }
    }

    // Each internal edge was counted from both ends
    endpoints as f64 / (n * (n - 1)) as f64
}

/// Most connected members by intra-community degree, ties by ascending id
pub fn central_nodes(graph: &SocialGraph, members: &[NodeId], top_n: usize) -> Vec<NodeId> {
    let member_set: HashSet<NodeId> = members.iter().copied().collect();

    members
        .iter()
        .map(|&node| {
            let degree = graph
                .neighbors(node)
                .map(|neighbors| neighbors.filter(|n| member_set.contains(n)).count())
                .unwrap_or(0);
            (node, degree)
        })
        .sorted_by_key(|&(node, degree)| (Reverse(degree), node))
        .take(top_n)
        .map(|(node, _)| node)
        .collect()
}

/// Summarize every community, largest first
pub fn summarize_communities(
    graph: &SocialGraph,
    partition: &Partition,
    top_n: usize,
) -> Vec<Community> {
    log::info!("Summarizing {} communities", partition.community_count());

    let mut communities: Vec<Community> = partition
        .communities()
        .into_iter()
        .enumerate()
        .map(|(id, members)| Community {
            id,
            size: members.len(),
            density: calculate_density(graph, &members),
            central_nodes: central_nodes(graph, &members, top_n),
            members,
        })
        .collect();

    communities.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
    communities
}
