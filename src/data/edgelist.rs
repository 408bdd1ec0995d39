//! Whitespace-separated edge list handling

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::{GraphBuilder, NodeId, SocialGraph};

/// Load an undirected graph from an edge list file
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<SocialGraph> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open edge list {}", path.display()))?;

    parse_edge_list(BufReader::new(file))
        .with_context(|| format!("Failed to parse edge list {}", path.display()))
}

/// Parse `u v` pairs, one per line.
///
/// Blank lines and `#` comments are skipped; columns after the second are
/// ignored. Duplicate edges collapse into one.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<SocialGraph> {
    let mut builder = GraphBuilder::new();
    let mut duplicates = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;

        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut fields = content.split_whitespace();
        let (u, v) = match (fields.next(), fields.next()) {
            (Some(u), Some(v)) => (parse_node(u, line_no)?, parse_node(v, line_no)?),
            _ => return Err(anyhow!("Line {}: expected two node ids, got {:?}", line_no, content)),
        };

        let inserted = builder
            .add_edge(u, v)
            .with_context(|| format!("Line {}: rejected edge {} {}", line_no, u, v))?;
        if !inserted {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        log::debug!("Collapsed {} duplicate edges", duplicates);
    }

    let graph = builder.build();
    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

fn parse_node(token: &str, line_no: usize) -> Result<NodeId> {
    token
        .parse()
        .with_context(|| format!("Line {}: invalid node id {:?}", line_no, token))
}
