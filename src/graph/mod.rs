//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod centrality;
pub mod compressed;

pub use builder::GraphBuilder;
pub use centrality::{degree_centrality, CentralityScores};
pub use compressed::SocialGraph;

/// Identifier of a user in the social graph
pub type NodeId = u64;
