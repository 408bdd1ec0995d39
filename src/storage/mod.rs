//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};
use statrs::statistics::Statistics;

use crate::cluster::{Community, Detection};
use crate::graph::{CentralityScores, NodeId, SocialGraph};
use crate::recommend::UserRecommendations;

/// Save analysis results to the specified directory
pub fn save_results(
    graph: &SocialGraph,
    detection: &Detection,
    communities: &[Community],
    centrality: &CentralityScores,
    influential: &[NodeId],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} communities to {}", communities.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(graph, detection, centrality, influential, output_dir)?;
    save_partition(detection, output_dir)?;
    save_communities(communities, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save per-user recommendations
pub fn save_recommendations(recommendations: &UserRecommendations, output_dir: &str) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let path = Path::new(output_dir).join(format!("recommendations_{}.json", recommendations.user));
    log::info!("Saving recommendations to {}", path.display());

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(recommendations)?.as_bytes())?;

    Ok(())
}

/// Save summary information
fn save_summary(
    graph: &SocialGraph,
    detection: &Detection,
    centrality: &CentralityScores,
    influential: &[NodeId],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let degrees: Vec<f64> = (0..graph.node_count())
        .map(|idx| graph.degree_at(idx) as f64)
        .collect();
    let (avg_degree, degree_std_dev) = if degrees.len() > 1 {
        (degrees.iter().mean(), degrees.iter().std_dev())
    } else {
        (degrees.first().copied().unwrap_or(0.0), 0.0)
    };
    let max_degree = (0..graph.node_count())
        .map(|idx| graph.degree_at(idx))
        .fold(0, usize::max);

    let influential_nodes: Vec<_> = influential
        .iter()
        .map(|&node| {
            json!({
                "node": node,
                "degree": graph.degree(node).unwrap_or(0),
                "centrality": centrality.get(node).unwrap_or(0.0),
            })
        })
        .collect();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "avg_degree": avg_degree,
            "degree_std_dev": degree_std_dev,
            "max_degree": max_degree,
        },
        "community_stats": {
            "community_count": detection.partition.community_count(),
            "modularity": detection.modularity,
            "levels": detection.levels,
            "passes": detection.passes,
            "converged": detection.converged,
        },
        "influential_nodes": influential_nodes,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the node to community assignment
fn save_partition(detection: &Detection, output_dir: &str) -> Result<()> {
    log::info!("Saving partition of {} nodes", detection.partition.len());

    let path = Path::new(output_dir).join("partition.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&detection.partition)?.as_bytes())?;

    Ok(())
}

/// Save community summaries
fn save_communities(communities: &[Community], output_dir: &str) -> Result<()> {
    log::info!("Saving community summaries");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let communities_json = json!({ "communities": communities });
    file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;

    Ok(())
}
