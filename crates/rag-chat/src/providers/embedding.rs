//! Embedding provider trait for turning text into vectors

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementations:
/// - `AzureOpenAiClient`: Azure OpenAI embeddings deployment (text-embedding-ada-002)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text (empty text is allowed)
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
