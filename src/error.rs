//! Error types shared by the analysis core

use thiserror::Error;

use crate::graph::NodeId;

/// Result alias for the analysis core
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by graph construction, detection and recommendation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An edge from a node to itself was inserted
    #[error("invalid edge: self-loop on node {node}")]
    InvalidEdge { node: NodeId },

    /// A queried node is not part of the graph or partition
    #[error("user {node} not found")]
    UserNotFound { node: NodeId },

    /// Community detection stopped at its pass cap before reaching a local optimum
    #[error("community detection stopped after {passes} passes without converging")]
    IterationLimitExceeded { passes: usize },
}
