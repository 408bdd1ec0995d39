//! Recommendation and link prediction module

pub mod content;
pub mod friends;
pub mod links;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Partition;
use crate::error::Result;
use crate::graph::{CentralityScores, NodeId, SocialGraph};

pub use content::recommend_content;
pub use friends::recommend_friends;
pub use links::{adamic_adar, adamic_adar_scores, predict_links};

/// Opaque content identifier
pub type ContentId = String;

/// Content each user interacted with, in interaction order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentInteractions {
    by_user: BTreeMap<NodeId, Vec<ContentId>>,
}

impl ContentInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interaction for a user
    pub fn record(&mut self, user: NodeId, content: impl Into<ContentId>) {
        self.by_user.entry(user).or_default().push(content.into());
    }

    /// Interactions of a user, empty if none were recorded
    pub fn get(&self, user: NodeId) -> &[ContentId] {
        self.by_user.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of users with interactions
    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

impl<C: Into<ContentId>> FromIterator<(NodeId, Vec<C>)> for ContentInteractions {
    fn from_iter<I: IntoIterator<Item = (NodeId, Vec<C>)>>(iter: I) -> Self {
        let by_user = iter
            .into_iter()
            .map(|(user, items)| (user, items.into_iter().map(Into::into).collect()))
            .collect();
        Self { by_user }
    }
}

/// Every recommendation produced for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecommendations {
    pub user: NodeId,
    pub content: Vec<ContentId>,
    pub friends: Vec<NodeId>,
    pub predicted_links: Vec<NodeId>,
}

/// Run the content, friend and link recommenders for one user
pub fn recommend_for_user(
    user: NodeId,
    graph: &SocialGraph,
    partition: &Partition,
    centrality: &CentralityScores,
    interactions: &ContentInteractions,
    k: usize,
) -> Result<UserRecommendations> {
    log::info!("Generating recommendations for user {}", user);

    Ok(UserRecommendations {
        user,
        content: recommend_content(user, partition, interactions, k)?,
        friends: recommend_friends(user, graph, partition, centrality, k)?,
        predicted_links: predict_links(graph, user, k)?,
    })
}
