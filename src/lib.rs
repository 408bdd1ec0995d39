//! Core library functions for the social graph analyzer

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod recommend;
pub mod storage;
pub mod viz;

pub use cluster::{Community, CommunityId, Detection, Louvain, Partition};
pub use config::Config;
pub use error::{AnalysisError, Result};
pub use graph::{degree_centrality, CentralityScores, GraphBuilder, NodeId, SocialGraph};
pub use recommend::{
    predict_links, recommend_content, recommend_friends, ContentInteractions,
    UserRecommendations,
};
