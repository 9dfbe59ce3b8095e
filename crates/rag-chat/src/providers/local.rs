//! In-process vector store
//!
//! Brute-force scoring over every record of a collection. Used for local
//! runs without Qdrant and as the store behind the pipeline and loader tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{CollectionSchema, Distance, SearchMatch, SearchParams, VectorRecord};

use super::vector_store::VectorStoreProvider;

struct Collection {
    schema: CollectionSchema,
    /// Insertion order; an upsert replaces in place
    records: Vec<VectorRecord>,
}

/// In-memory vector store keyed by collection name
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Similarity of two equal-length vectors under `distance`, higher is closer
pub fn similarity(distance: Distance, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match distance {
        Distance::Dot => dot,
        Distance::Cosine => {
            let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot / (norm_a * norm_b)
            }
        }
        Distance::Euclid => {
            let squared: f32 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
            -squared.sqrt()
        }
    }
}

fn missing(collection: &str) -> Error {
    Error::vector_db(format!("Collection '{}' not found", collection))
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn collection_exists(&self, collection: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(collection))
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(&schema.name) {
            return Err(Error::vector_db(format!(
                "Collection '{}' already exists",
                schema.name
            )));
        }
        collections.insert(
            schema.name.clone(),
            Collection {
                schema: schema.clone(),
                records: Vec::new(),
            },
        );
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        let mut collections = self.collections.write();
        let target = collections.get_mut(collection).ok_or_else(|| missing(collection))?;

        // Validate the whole batch before touching anything
        for record in records {
            target.schema.check_dimensions(&record.vector)?;
        }

        for record in records {
            match target.records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => target.records.push(record.clone()),
            }
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        params: SearchParams,
    ) -> Result<Vec<SearchMatch>> {
        let collections = self.collections.read();
        let target = collections.get(collection).ok_or_else(|| missing(collection))?;
        target.schema.check_dimensions(query)?;

        let mut scored: Vec<(f32, &VectorRecord)> = target
            .records
            .iter()
            .map(|r| (similarity(target.schema.distance, query, &r.vector), r))
            .collect();

        // Stable sort keeps insertion order between equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(params.limit);

        Ok(scored
            .into_iter()
            .map(|(score, record)| SearchMatch {
                id: record.id,
                score,
                payload: params.with_payload.then(|| record.payload.clone()),
                vector: params.with_vector.then(|| record.vector.clone()),
            })
            .collect())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.records.len())
            .ok_or_else(|| missing(collection))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
