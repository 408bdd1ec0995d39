//! Content interaction loading

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::recommend::ContentInteractions;

/// Load user content interactions from a JSON object keyed by user id,
/// e.g. `{"1": ["Content_A", "Content_B"]}`
pub fn load_interactions<P: AsRef<Path>>(path: P) -> Result<ContentInteractions> {
    let path = path.as_ref();
    log::info!("Reading content interactions: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open interactions file {}", path.display()))?;
    let interactions: ContentInteractions = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse interactions file {}", path.display()))?;

    log::info!("Loaded interactions for {} users", interactions.len());

    Ok(interactions)
}
