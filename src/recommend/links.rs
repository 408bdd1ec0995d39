//! Link prediction with the Adamic-Adar index

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::Result;
use crate::graph::centrality::compare_scores;
use crate::graph::{NodeId, SocialGraph};

/// Adamic-Adar score between two dense indices.
///
/// Sums `1 / ln(degree(w))` over common neighbors `w`, skipping neighbors of
/// degree one. Both rows are sorted, so common neighbors are visited in
/// ascending order regardless of argument order and the score is symmetric.
fn score_indices(graph: &SocialGraph, u: usize, v: usize) -> f64 {
    let neighbors_u = graph.neighbor_indices(u);
    let neighbors_v = graph.neighbor_indices(v);

    let mut score = 0.0;
    let (mut i, mut j) = (0, 0);

    while i < neighbors_u.len() && j < neighbors_v.len() {
        match neighbors_u[i].cmp(&neighbors_v[j]) {
            Ordering::Equal => {
                let degree = graph.degree_at(neighbors_u[i] as usize);
                if degree > 1 {
                    score += 1.0 / (degree as f64).ln();
                }
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }

    score
}

/// Adamic-Adar score for a single pair of nodes
pub fn adamic_adar(graph: &SocialGraph, u: NodeId, v: NodeId) -> Result<f64> {
    let u_idx = graph.index_of(u)?;
    let v_idx = graph.index_of(v)?;
    Ok(score_indices(graph, u_idx, v_idx))
}

/// Scores of every other node against `user`, best first.
///
/// Already connected nodes are scored too. Ties are broken by ascending id.
pub fn adamic_adar_scores(graph: &SocialGraph, user: NodeId) -> Result<Vec<(NodeId, f64)>> {
    let user_idx = graph.index_of(user)?;

    let mut scores: Vec<(NodeId, f64)> = (0..graph.node_count())
        .into_par_iter()
        .filter(|&idx| idx != user_idx)
        .map(|idx| (graph.node_id(idx), score_indices(graph, user_idx, idx)))
        .collect();

    scores.par_sort_by(compare_scores);
    Ok(scores)
}

/// Nodes most likely to form a future link with `user`
pub fn predict_links(graph: &SocialGraph, user: NodeId, k: usize) -> Result<Vec<NodeId>> {
    log::info!("Predicting links for user {}", user);

    Ok(adamic_adar_scores(graph, user)?
        .into_iter()
        .take(k)
        .map(|(node, _)| node)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    const EPS: f64 = 1e-12;

    fn path() -> SocialGraph {
        SocialGraph::from_edges(vec![(1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_path_scores() {
        let graph = path();
        let expected = 1.0 / 2f64.ln();
        assert!((adamic_adar(&graph, 1, 3).unwrap() - expected).abs() < EPS);
        assert_eq!(adamic_adar(&graph, 1, 2).unwrap(), 0.0);

        let scores = adamic_adar_scores(&graph, 1).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, 3);
        assert_eq!(scores[1], (2, 0.0));
        assert_eq!(predict_links(&graph, 1, 5).unwrap(), vec![3, 2]);
    }

    #[test]
    fn test_disconnected_nodes_score_zero() {
        let graph = SocialGraph::from_edges(vec![(1, 2), (3, 4)]).unwrap();
        assert_eq!(adamic_adar(&graph, 1, 3).unwrap(), 0.0);
        assert_eq!(predict_links(&graph, 1, 5).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_symmetry() {
        let graph = SocialGraph::from_edges(vec![
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (2, 6),
            (3, 6),
        ])
        .unwrap();

        for u in graph.nodes() {
            for v in graph.nodes() {
                assert_eq!(
                    adamic_adar(&graph, u, v).unwrap(),
                    adamic_adar(&graph, v, u).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_ranking_prefers_rare_neighbors() {
        // 1 and 5 share hub 2; 1 and 6 share the low-degree node 3
        let graph = SocialGraph::from_edges(vec![
            (1, 2),
            (2, 5),
            (2, 7),
            (2, 8),
            (2, 9),
            (1, 3),
            (3, 6),
        ])
        .unwrap();

        let top = predict_links(&graph, 1, 2).unwrap();
        assert_eq!(top, vec![6, 5]);
    }

    #[test]
    fn test_unknown_user() {
        let graph = path();
        assert_eq!(
            predict_links(&graph, 8, 3),
            Err(AnalysisError::UserNotFound { node: 8 })
        );
    }
}
