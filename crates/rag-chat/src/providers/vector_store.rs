//! Vector store provider trait for collection management and similarity search

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{CollectionSchema, SearchMatch, SearchParams, VectorRecord};

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `QdrantStore`: Qdrant over its REST API
/// - `InMemoryVectorStore`: brute-force in-process store
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Whether a collection with this name exists
    async fn collection_exists(&self, collection: &str) -> Result<bool>;

    /// Create a collection with a fixed dimensionality and metric
    async fn create_collection(&self, schema: &CollectionSchema) -> Result<()>;

    /// Insert or replace records by id, returning once they are searchable
    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()>;

    /// Nearest neighbours of `query`, best match first
    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        params: SearchParams,
    ) -> Result<Vec<SearchMatch>>;

    /// Number of records in a collection
    async fn count(&self, collection: &str) -> Result<usize>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
