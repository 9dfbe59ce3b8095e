//! Supporting-context retrieval from the vector collection

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::VectorStoreProvider;
use crate::types::{SearchMatch, SearchParams};

/// Finds the stored text closest to a query vector
pub struct ContextRetriever {
    store: Arc<dyn VectorStoreProvider>,
    collection: String,
    limit: usize,
}

impl ContextRetriever {
    /// Create a retriever over `collection` returning `limit` matches per search
    pub fn new(store: Arc<dyn VectorStoreProvider>, collection: impl Into<String>, limit: usize) -> Self {
        Self {
            store,
            collection: collection.into(),
            limit,
        }
    }

    /// Top-`limit` matches, best first
    pub async fn search(&self, query: &[f32]) -> Result<Vec<SearchMatch>> {
        self.store
            .search(&self.collection, query, SearchParams::top(self.limit))
            .await
    }

    /// Payload text of the best match
    ///
    /// Lower-ranked matches are fetched but not used. An empty result is
    /// `Error::NoSupportingContext`.
    pub async fn supporting_text(&self, query: &[f32]) -> Result<String> {
        let matches = self.search(query).await?;
        tracing::debug!("Vector search returned {} matches", matches.len());

        let best = matches.first().ok_or(Error::NoSupportingContext)?;
        tracing::info!("Retrieved supporting text from point {} (score {:.4})", best.id, best.score);
        Ok(best.text().to_string())
    }

    /// Check the backing store
    pub async fn health_check(&self) -> Result<bool> {
        self.store.health_check().await
    }
}
