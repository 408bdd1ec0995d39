//! Visualization export module
//!
//! Writes data files for an external renderer: one color per community and
//! highlighted influential nodes. Nothing is drawn here.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cluster::{Community, Partition};
use crate::graph::{CentralityScores, NodeId, SocialGraph};

/// Generate visualization inputs from analysis results
pub fn generate_visualizations(
    graph: &SocialGraph,
    partition: &Partition,
    communities: &[Community],
    centrality: &CentralityScores,
    influential: &[NodeId],
    output_dir: &str,
) -> Result<()> {
    log::info!("Generating visualization data for {} communities", communities.len());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    let influential: HashSet<NodeId> = influential.iter().copied().collect();

    generate_node_table(graph, partition, centrality, &influential, &viz_dir)?;
    generate_community_stats(communities, &viz_dir)?;
    generate_dot(graph, partition, &influential, &viz_dir)?;

    log::info!("Visualization data generated successfully");

    Ok(())
}

/// CSV with one row per node
fn generate_node_table(
    graph: &SocialGraph,
    partition: &Partition,
    centrality: &CentralityScores,
    influential: &HashSet<NodeId>,
    viz_dir: &Path,
) -> Result<()> {
    let mut file = File::create(viz_dir.join("nodes.csv"))?;
    writeln!(file, "id,community,degree,centrality,influential")?;

    for (node, community) in partition.iter() {
        writeln!(
            file,
            "{},{},{},{:.6},{}",
            node,
            community,
            graph.degree(node)?,
            centrality.get(node).unwrap_or(0.0),
            influential.contains(&node)
        )?;
    }

    Ok(())
}

/// CSV with one row per community
fn generate_community_stats(communities: &[Community], viz_dir: &Path) -> Result<()> {
    let mut file = File::create(viz_dir.join("community_stats.csv"))?;
    writeln!(file, "community_id,size,density,central_nodes_count")?;

    for community in communities {
        writeln!(
            file,
            "{},{},{:.6},{}",
            community.id,
            community.size,
            community.density,
            community.central_nodes.len()
        )?;
    }

    Ok(())
}

/// Build a petgraph copy labelled `node (cN)`, influential nodes marked with `*`
fn labelled_graph(
    graph: &SocialGraph,
    partition: &Partition,
    influential: &HashSet<NodeId>,
) -> Result<UnGraph<String, u32>> {
    let mut labelled = UnGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes() {
        let marker = if influential.contains(&node) { "*" } else { "" };
        let label = format!("{}{} (c{})", node, marker, partition.community_of(node)?);
        indices.insert(node, labelled.add_node(label));
    }
    for (u, v) in graph.edges() {
        labelled.add_edge(indices[&u], indices[&v], 1);
    }

    Ok(labelled)
}

fn generate_dot(
    graph: &SocialGraph,
    partition: &Partition,
    influential: &HashSet<NodeId>,
    viz_dir: &Path,
) -> Result<()> {
    let labelled = labelled_graph(graph, partition, influential)?;
    let mut file = File::create(viz_dir.join("graph.dot"))?;
    write!(file, "{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))?;
    Ok(())
}
