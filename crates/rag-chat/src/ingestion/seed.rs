//! Seed file of precomputed embeddings

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::VectorRecord;

/// One element of the seed file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedEntry {
    /// Precomputed embedding
    pub vector: Vec<f32>,
    /// Text the embedding was computed from
    pub text: String,
}

/// Read a JSON array of seed entries
pub async fn read_seed_file(path: &Path) -> Result<Vec<SeedEntry>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let entries: Vec<SeedEntry> = serde_json::from_str(&raw)?;
    tracing::info!("Read {} seed entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Records with sequential ids starting at 1, in file order
pub fn to_records(entries: Vec<SeedEntry>) -> Vec<VectorRecord> {
    entries
        .into_iter()
        .zip(1u64..)
        .map(|(entry, id)| VectorRecord::new(id, entry.vector, entry.text))
        .collect()
}
