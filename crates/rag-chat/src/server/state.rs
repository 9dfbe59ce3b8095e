//! Application state for the chat backend and the vector loader

use std::sync::Arc;

use crate::config::{ChatMode, RagConfig};
use crate::error::Result;
use crate::ingestion::VectorLoader;
use crate::pipeline::ChatPipeline;
use crate::providers::{AzureOpenAiClient, QdrantStore, VectorStoreProvider};
use crate::retrieval::ContextRetriever;

/// Shared state of the chat backend
#[derive(Clone)]
pub struct ChatState {
    inner: Arc<ChatStateInner>,
}

struct ChatStateInner {
    /// Configuration
    config: RagConfig,
    /// Embed → search → complete pipeline
    pipeline: ChatPipeline,
}

impl ChatState {
    /// Build providers from configuration
    ///
    /// Nothing is contacted here; missing credentials fail on first request.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing chat state (mode: {:?})...", config.mode);

        let azure = Arc::new(AzureOpenAiClient::new(&config.azure)?);
        tracing::info!(
            "Azure OpenAI client initialized (completion: {}, embeddings: {})",
            config.azure.model,
            config.azure.embedding_model
        );

        let pipeline = match config.mode {
            ChatMode::Rag => {
                let store: Arc<dyn VectorStoreProvider> = Arc::new(QdrantStore::new(&config.vector_db)?);
                tracing::info!("Qdrant store initialized at {}", config.vector_db.url);

                let retriever = ContextRetriever::new(
                    store,
                    config.vector_db.collection.name.clone(),
                    config.vector_db.search_limit,
                );
                ChatPipeline::rag(azure.clone(), retriever, azure)
            }
            ChatMode::Plain => ChatPipeline::plain(azure),
        };

        Ok(Self::from_parts(config, pipeline))
    }

    /// Assemble state from an already-built pipeline
    pub fn from_parts(config: RagConfig, pipeline: ChatPipeline) -> Self {
        Self {
            inner: Arc::new(ChatStateInner { config, pipeline }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the chat pipeline
    pub fn pipeline(&self) -> &ChatPipeline {
        &self.inner.pipeline
    }
}

/// Shared state of the vector loader
#[derive(Clone)]
pub struct LoaderState {
    inner: Arc<LoaderStateInner>,
}

struct LoaderStateInner {
    config: RagConfig,
    loader: VectorLoader,
}

impl LoaderState {
    /// Build the Qdrant-backed loader from configuration
    pub fn new(config: RagConfig) -> Result<Self> {
        let store = Arc::new(QdrantStore::new(&config.vector_db)?);
        tracing::info!("Qdrant store initialized at {}", config.vector_db.url);

        let loader = VectorLoader::new(store, config.vector_db.collection.clone(), &config.loader);
        Ok(Self::from_parts(config, loader))
    }

    /// Assemble state from an already-built loader
    pub fn from_parts(config: RagConfig, loader: VectorLoader) -> Self {
        Self {
            inner: Arc::new(LoaderStateInner { config, loader }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the loader
    pub fn loader(&self) -> &VectorLoader {
        &self.inner.loader
    }
}
