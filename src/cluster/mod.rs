//! Community analysis module

pub mod detection;
pub mod metrics;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::graph::{NodeId, SocialGraph};

pub use detection::{Detection, Louvain};

/// Identifier of a community; dense from 0
pub type CommunityId = usize;

/// Assignment of every node to exactly one community.
///
/// Community ids are always dense from 0 and numbered in order of first
/// appearance when nodes are visited in ascending id order.
///
/// Deserialized labels go through the same renumbering, so arbitrary ids in
/// a stored assignment come back dense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NodeId, usize>",
    into = "BTreeMap<NodeId, CommunityId>"
)]
pub struct Partition {
    assignments: BTreeMap<NodeId, CommunityId>,

    /// Number of distinct communities
    community_count: usize,
}

impl Partition {
    /// Build a partition from arbitrary community labels, renumbering them densely
    pub fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, usize)>,
    {
        let raw: BTreeMap<NodeId, usize> = assignments.into_iter().collect();

        let mut renumbered: HashMap<usize, CommunityId> = HashMap::new();
        let assignments = raw
            .into_iter()
            .map(|(node, label)| {
                let next = renumbered.len();
                let community = *renumbered.entry(label).or_insert(next);
                (node, community)
            })
            .collect();

        Self {
            assignments,
            community_count: renumbered.len(),
        }
    }

    /// Build a partition from labels aligned with the graph's dense indices
    pub(crate) fn from_indexed(graph: &SocialGraph, labels: &[usize]) -> Self {
        Self::from_assignments(
            labels
                .iter()
                .enumerate()
                .map(|(idx, &label)| (graph.node_id(idx), label)),
        )
    }

    /// Every node in its own community
    pub fn singletons(graph: &SocialGraph) -> Self {
        Self::from_assignments(graph.nodes().enumerate().map(|(idx, node)| (node, idx)))
    }

    pub fn community_of(&self, node: NodeId) -> Result<CommunityId> {
        self.assignments
            .get(&node)
            .copied()
            .ok_or(AnalysisError::UserNotFound { node })
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.assignments.contains_key(&node)
    }

    /// Members of a community in ascending node order
    pub fn members(&self, community: CommunityId) -> Vec<NodeId> {
        self.assignments
            .iter()
            .filter(|&(_, &c)| c == community)
            .map(|(&node, _)| node)
            .collect()
    }

    /// Member lists indexed by community id
    pub fn communities(&self) -> Vec<Vec<NodeId>> {
        let mut groups = vec![Vec::new(); self.community_count()];
        for (&node, &community) in &self.assignments {
            groups[community].push(node);
        }
        groups
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Number of assigned nodes
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments in ascending node order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, CommunityId)> + '_ {
        self.assignments.iter().map(|(&node, &community)| (node, community))
    }
}

impl From<BTreeMap<NodeId, usize>> for Partition {
    fn from(assignments: BTreeMap<NodeId, usize>) -> Self {
        Self::from_assignments(assignments)
    }
}

impl From<Partition> for BTreeMap<NodeId, CommunityId> {
    fn from(partition: Partition) -> Self {
        partition.assignments
    }
}

/// Summary of one detected community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    /// Community identifier within its partition
    pub id: CommunityId,

    /// Members of this community (ascending node ids)
    pub members: Vec<NodeId>,

    /// Size of the community
    pub size: usize,

    /// Density: internal edges / potential internal edges
    pub density: f64,

    /// Most connected members by intra-community degree
    pub central_nodes: Vec<NodeId>,
}
