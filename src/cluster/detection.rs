//! Community detection by greedy modularity optimization.
//!
//! Louvain-style multi-level optimization:
//!
//! 1. **Local moving**: every node starts alone. Nodes are visited in
//!    ascending id order and moved to the neighboring community with the
//!    strictly greatest positive modularity gain; passes repeat until a full
//!    pass moves nothing.
//! 2. **Aggregation**: each community collapses into a super-node. Edge
//!    weights between super-nodes count the edges between their members and
//!    a super-node's self-weight is twice its internal edge count.
//!
//! Levels repeat until a level moves nothing or everything collapsed into a
//! single community. The number of local-moving passes is capped across all
//! levels; hitting the cap returns the partition found so far.

use std::collections::BTreeMap;

use crate::cluster::{metrics, Partition};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::graph::SocialGraph;

/// Gains closer than this are treated as equal
const GAIN_TOLERANCE: f64 = 1e-10;

/// Outcome of a community detection run
#[derive(Debug, Clone)]
pub struct Detection {
    /// Final node to community assignment
    pub partition: Partition,

    /// Aggregation levels that changed the partition
    pub levels: usize,

    /// Local-moving passes executed across all levels
    pub passes: usize,

    /// False when the pass cap stopped the run early
    pub converged: bool,

    /// Modularity of the final partition
    pub modularity: f64,
}

impl Detection {
    /// Treat hitting the pass cap as a hard error
    pub fn ensure_converged(self) -> Result<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(AnalysisError::IterationLimitExceeded {
                passes: self.passes,
            })
        }
    }
}

/// Louvain community detector
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Maximum local-moving passes across all levels
    max_passes: usize,
}

impl Default for Louvain {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Louvain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_passes: config.max_passes,
        }
    }

    /// Set the pass cap
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Partition the graph into communities
    pub fn detect(&self, graph: &SocialGraph) -> Result<Detection> {
        log::info!(
            "Detecting communities in graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        // Community of every original node, composed through the levels
        let mut assignment: Vec<usize> = (0..graph.node_count()).collect();
        let mut remaining = self.max_passes;
        let mut levels = 0;
        let mut converged = true;

        if graph.edge_count() > 0 {
            let mut level = LevelGraph::from_graph(graph);

            loop {
                let moving = level.local_moving(&mut remaining);

                if moving.moved {
                    levels += 1;
                    let (dense, count) = renumber(&moving.communities);
                    for community in assignment.iter_mut() {
                        *community = dense[*community];
                    }

                    log::debug!(
                        "Level {}: {} nodes collapsed into {} communities",
                        levels,
                        level.node_count(),
                        count
                    );

                    if moving.capped {
                        converged = false;
                        break;
                    }
                    if count == 1 {
                        break;
                    }
                    level = level.aggregate(&dense, count);
                } else {
                    converged = !moving.capped;
                    break;
                }
            }
        }

        let passes = self.max_passes - remaining;
        if !converged {
            log::warn!(
                "Community detection hit its cap of {} passes; returning best partition found",
                self.max_passes
            );
        }

        let partition = Partition::from_indexed(graph, &assignment);
        let modularity = metrics::modularity(graph, &partition)?;

        log::info!(
            "Found {} communities (modularity {:.4}, {} levels, {} passes)",
            partition.community_count(),
            modularity,
            levels,
            passes
        );

        Ok(Detection {
            partition,
            levels,
            passes,
            converged,
            modularity,
        })
    }
}

/// Result of the local moving phase on one level
struct LocalMoving {
    /// Community label per level node (labels are level node indices)
    communities: Vec<usize>,

    /// Whether any node changed community
    moved: bool,

    /// Whether the pass cap stopped this phase
    capped: bool,
}

/// Weighted graph for one aggregation level
struct LevelGraph {
    /// Weighted neighbor lists (no self entries), sorted by index
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Twice the internal edge weight collapsed into each node
    self_weights: Vec<f64>,

    /// Weighted degree: self weight plus incident edge weights
    degrees: Vec<f64>,

    /// Twice the total edge weight (2m); constant across levels
    total_weight: f64,
}

impl LevelGraph {
    fn from_graph(graph: &SocialGraph) -> Self {
        let adjacency: Vec<Vec<(usize, f64)>> = (0..graph.node_count())
            .map(|idx| {
                graph
                    .neighbor_indices(idx)
                    .iter()
                    .map(|&n| (n as usize, 1.0))
                    .collect()
            })
            .collect();

        Self::new(adjacency, vec![0.0; graph.node_count()])
    }

    fn new(adjacency: Vec<Vec<(usize, f64)>>, self_weights: Vec<f64>) -> Self {
        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&self_weights)
            .map(|(row, &sw)| sw + row.iter().map(|&(_, w)| w).sum::<f64>())
            .collect();
        let total_weight = degrees.iter().sum();

        Self {
            adjacency,
            self_weights,
            degrees,
            total_weight,
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Repeat passes until one moves nothing or the shared pass budget runs out
    fn local_moving(&self, remaining: &mut usize) -> LocalMoving {
        let n = self.node_count();
        let mut communities: Vec<usize> = (0..n).collect();
        let mut totals = self.degrees.clone();
        let mut moved = false;
        let mut capped = false;

        // Scratch space for weights from the visited node to each community
        let mut link_weights = vec![0.0; n];
        let mut touched: Vec<usize> = Vec::new();

        loop {
            if *remaining == 0 {
                capped = true;
                break;
            }
            *remaining -= 1;

            let mut moves = 0;
            for node in 0..n {
                let current = communities[node];
                let k = self.degrees[node];

                for &(neighbor, w) in &self.adjacency[node] {
                    let c = communities[neighbor];
                    if link_weights[c] == 0.0 {
                        touched.push(c);
                    }
                    link_weights[c] += w;
                }

                // Take the node out of its community before scoring
                totals[current] -= k;
                let stay = link_weights[current] - totals[current] * k / self.total_weight;

                let mut best = current;
                let mut best_gain = 0.0;
                for &c in &touched {
                    if c == current {
                        continue;
                    }
                    let gain =
                        link_weights[c] - totals[c] * k / self.total_weight - stay;
                    if gain <= GAIN_TOLERANCE {
                        continue;
                    }
                    // Equal gains go to the smaller community id
                    let better = gain > best_gain + GAIN_TOLERANCE;
                    let tied = best != current
                        && (gain - best_gain).abs() <= GAIN_TOLERANCE
                        && c < best;
                    if better || tied {
                        best = c;
                        best_gain = gain;
                    }
                }

                totals[best] += k;
                if best != current {
                    communities[node] = best;
                    moves += 1;
                }

                for c in touched.drain(..) {
                    link_weights[c] = 0.0;
                }
            }

            log::debug!("Local moving pass moved {} of {} nodes", moves, n);

            if moves == 0 {
                break;
            }
            moved = true;
        }

        LocalMoving {
            communities,
            moved,
            capped,
        }
    }

    /// Collapse each community into a super-node
    fn aggregate(&self, dense: &[usize], count: usize) -> Self {
        let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut self_weights = vec![0.0; count];

        for (node, row) in self.adjacency.iter().enumerate() {
            let cu = dense[node];
            self_weights[cu] += self.self_weights[node];

            // Each undirected edge is seen from both ends
            for &(neighbor, w) in row {
                let cv = dense[neighbor];
                if cu == cv {
                    self_weights[cu] += w;
                } else {
                    *rows[cu].entry(cv).or_insert(0.0) += w;
                }
            }
        }

        let adjacency = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();

        Self::new(adjacency, self_weights)
    }
}

/// Map raw labels to dense ids in order of first appearance
fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping = vec![usize::MAX; labels.len()];
    let mut next = 0;
    let dense = labels
        .iter()
        .map(|&label| {
            if mapping[label] == usize::MAX {
                mapping[label] = next;
                next += 1;
            }
            mapping[label]
        })
        .collect();
    (dense, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn two_triangles() -> SocialGraph {
        SocialGraph::from_edges(vec![(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6), (3, 4)])
            .unwrap()
    }

    fn assert_dense(graph: &SocialGraph, partition: &Partition) {
        assert_eq!(partition.len(), graph.node_count());
        for node in graph.nodes() {
            assert!(partition.community_of(node).unwrap() < partition.community_count());
        }
        for community in 0..partition.community_count() {
            assert!(!partition.members(community).is_empty());
        }
    }

    #[test]
    fn test_two_triangles() {
        let graph = two_triangles();
        let detection = Louvain::new().detect(&graph).unwrap();
        let partition = &detection.partition;

        assert!(detection.converged);
        assert_eq!(partition.community_count(), 2);
        assert_eq!(partition.members(0), vec![1, 2, 3]);
        assert_eq!(partition.members(1), vec![4, 5, 6]);
        assert!(detection.modularity > 0.3);
    }

    #[test]
    fn test_triangle_is_one_community() {
        let graph = SocialGraph::from_edges(vec![(1, 2), (2, 3), (3, 1)]).unwrap();
        let detection = Louvain::new().detect(&graph).unwrap();
        assert_eq!(detection.partition.community_count(), 1);
        assert_eq!(detection.levels, 1);
    }

    #[test]
    fn test_empty_graph() {
        let graph = SocialGraph::from_edges(Vec::<(NodeId, NodeId)>::new()).unwrap();
        let detection = Louvain::new().detect(&graph).unwrap();
        assert!(detection.partition.is_empty());
        assert!(detection.converged);
        assert_eq!(detection.passes, 0);
    }

    #[test]
    fn test_deterministic() {
        let graph = SocialGraph::from_edges(vec![
            (1, 2), (1, 3), (2, 3), (3, 4), (4, 5), (4, 6), (5, 6), (6, 7), (7, 8), (7, 9),
            (8, 9), (9, 1),
        ])
        .unwrap();
        let first = Louvain::new().detect(&graph).unwrap();
        let second = Louvain::new().detect(&graph).unwrap();
        assert_eq!(first.partition, second.partition);
        assert_dense(&graph, &first.partition);
    }

    #[test]
    fn test_pass_cap_returns_partial_result() {
        let graph = two_triangles();
        let detection = Louvain::new().with_max_passes(1).detect(&graph).unwrap();

        assert!(!detection.converged);
        assert_eq!(detection.passes, 1);
        assert_dense(&graph, &detection.partition);
        assert_eq!(
            detection.ensure_converged().unwrap_err(),
            AnalysisError::IterationLimitExceeded { passes: 1 }
        );
    }

    #[test]
    fn test_zero_pass_cap() {
        let graph = two_triangles();
        let detection = Louvain::new().with_max_passes(0).detect(&graph).unwrap();
        assert!(!detection.converged);
        assert_eq!(detection.partition, Partition::singletons(&graph));
    }

    #[test]
    fn test_never_worse_than_singletons() {
        let graphs = vec![
            two_triangles(),
            SocialGraph::from_edges((1..=5).map(|leaf| (0, leaf))).unwrap(),
            SocialGraph::from_edges((1..10).map(|i| (i, i + 1))).unwrap(),
            SocialGraph::from_edges(vec![(1, 2), (3, 4), (5, 6)]).unwrap(),
        ];

        for graph in graphs {
            let detection = Louvain::new().detect(&graph).unwrap();
            let baseline = metrics::modularity(&graph, &Partition::singletons(&graph)).unwrap();
            assert!(detection.modularity >= baseline - 1e-12);
            assert_dense(&graph, &detection.partition);
        }
    }

    #[test]
    fn test_reported_modularity_matches_partition() {
        let graph = two_triangles();
        let detection = Louvain::new().detect(&graph).unwrap();
        let expected = metrics::modularity(&graph, &detection.partition).unwrap();
        assert_eq!(detection.modularity, expected);
    }

    #[test]
    fn test_local_moving_ties_pick_smaller_community() {
        // Star 0-1, 0-2 with the larger community visited first from node 0
        let level = LevelGraph::new(
            vec![vec![(2, 1.0), (1, 1.0)], vec![(0, 1.0)], vec![(0, 1.0)]],
            vec![0.0; 3],
        );
        let mut remaining = 10;
        let moving = level.local_moving(&mut remaining);

        assert!(moving.moved);
        assert!(!moving.capped);
        assert_eq!(moving.communities, vec![1, 1, 1]);
    }

    #[test]
    fn test_local_moving_near_equal_gains_tie() {
        // Joining community 2 gains 5e-13 more than joining community 1
        let level = LevelGraph::new(
            vec![
                vec![(2, 1.0 + 1e-12), (1, 1.0)],
                vec![(0, 1.0)],
                vec![(0, 1.0 + 1e-12)],
            ],
            vec![0.0; 3],
        );
        let mut remaining = 10;
        let moving = level.local_moving(&mut remaining);

        assert_eq!(moving.communities, vec![1, 1, 1]);
    }

    #[test]
    fn test_aggregate_preserves_total_weight() {
        let graph = two_triangles();
        let level = LevelGraph::from_graph(&graph);
        let dense = vec![0, 0, 0, 1, 1, 1];
        let coarse = level.aggregate(&dense, 2);

        assert_eq!(coarse.self_weights, vec![6.0, 6.0]);
        assert_eq!(coarse.adjacency, vec![vec![(1, 1.0)], vec![(0, 1.0)]]);
        assert_eq!(coarse.degrees, vec![7.0, 7.0]);
        assert_eq!(coarse.total_weight, level.total_weight);
    }

    #[test]
    fn test_renumber() {
        assert_eq!(renumber(&[3, 3, 0, 5, 0, 5]), (vec![0, 0, 1, 2, 1, 2], 3));
    }
}
