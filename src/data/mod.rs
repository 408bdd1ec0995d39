//! Input loading for the analysis pipeline

pub mod edgelist;
pub mod interactions;

pub use edgelist::{load_edge_list, parse_edge_list};
pub use interactions::load_interactions;
