//! Degree centrality

use std::cmp::Ordering;
use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::graph::{NodeId, SocialGraph};

/// Centrality score in [0, 1] for every node of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityScores {
    scores: BTreeMap<NodeId, f64>,
}

impl CentralityScores {
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.scores.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores in ascending node order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().map(|(&node, &score)| (node, score))
    }

    /// Highest scoring nodes, ties broken by ascending node id
    pub fn top(&self, k: usize) -> Vec<NodeId> {
        self.iter()
            .sorted_by(|a, b| compare_scores(a, b))
            .take(k)
            .map(|(node, _)| node)
            .collect()
    }
}

/// Descending by score, then ascending by node id
pub(crate) fn compare_scores(a: &(NodeId, f64), b: &(NodeId, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Degree centrality: degree / (n - 1), or 0 for graphs with at most one node
pub fn degree_centrality(graph: &SocialGraph) -> CentralityScores {
    let n = graph.node_count();
    log::info!("Computing degree centrality for {} nodes", n);

    let scores = (0..n)
        .map(|idx| {
            let score = if n > 1 {
                graph.degree_at(idx) as f64 / (n - 1) as f64
            } else {
                0.0
            };
            (graph.node_id(idx), score)
        })
        .collect();

    CentralityScores { scores }
}
