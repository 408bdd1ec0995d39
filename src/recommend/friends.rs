//! Friend recommendation within a community

use std::collections::HashSet;

use crate::cluster::Partition;
use crate::error::{AnalysisError, Result};
use crate::graph::centrality::compare_scores;
use crate::graph::{CentralityScores, NodeId, SocialGraph};

/// Most central members of a user's community that are not yet connected to them.
///
/// Candidates exclude the user and their current neighbors, and are ranked by
/// centrality (descending) with ties broken by ascending node id.
pub fn recommend_friends(
    user: NodeId,
    graph: &SocialGraph,
    partition: &Partition,
    centrality: &CentralityScores,
    k: usize,
) -> Result<Vec<NodeId>> {
    let community = partition.community_of(user)?;
    let friends: HashSet<NodeId> = graph.neighbors(user)?.collect();

    let mut candidates = partition
        .members(community)
        .into_iter()
        .filter(|&member| member != user && !friends.contains(&member))
        .map(|member| {
            centrality
                .get(member)
                .map(|score| (member, score))
                .ok_or(AnalysisError::UserNotFound { node: member })
        })
        .collect::<Result<Vec<_>>>()?;

    candidates.sort_by(compare_scores);

    log::debug!(
        "User {} has {} friend candidates in community {}",
        user,
        candidates.len(),
        community
    );

    Ok(candidates.into_iter().take(k).map(|(node, _)| node).collect())
}
