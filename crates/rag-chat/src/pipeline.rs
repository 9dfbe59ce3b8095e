//! The chat request pipeline
//!
//! RAG mode runs three outbound calls strictly in sequence:
//! embed the message, search the collection, complete with the best match's
//! text as supporting context. Plain mode only runs the completion.

use std::sync::Arc;

use crate::config::ChatMode;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::{ChatMessage, CompletionProvider, EmbeddingProvider, SamplingParams};
use crate::retrieval::ContextRetriever;
use crate::types::ChatReply;

/// How the pipeline answers
pub enum PipelineMode {
    /// Retrieval-augmented
    Rag {
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: ContextRetriever,
    },
    /// Direct completion
    Plain,
}

/// Turns one chat message into one reply
pub struct ChatPipeline {
    mode: PipelineMode,
    completion: Arc<dyn CompletionProvider>,
    sampling: SamplingParams,
}

impl ChatPipeline {
    /// Retrieval-augmented pipeline
    pub fn rag(
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: ContextRetriever,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            mode: PipelineMode::Rag { embedder, retriever },
            completion,
            sampling: SamplingParams::default(),
        }
    }

    /// Pipeline that skips retrieval
    pub fn plain(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            mode: PipelineMode::Plain,
            completion,
            sampling: SamplingParams::default(),
        }
    }

    /// Override the sampling parameters
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Which mode this pipeline runs in
    pub fn mode(&self) -> ChatMode {
        match self.mode {
            PipelineMode::Rag { .. } => ChatMode::Rag,
            PipelineMode::Plain => ChatMode::Plain,
        }
    }

    /// Answer a message
    pub async fn answer(&self, message: &str) -> Result<ChatReply> {
        let messages = match &self.mode {
            PipelineMode::Rag { embedder, retriever } => {
                let query_embedding = Self::embed_query(embedder.as_ref(), message).await?;
                let supporting_text = retriever.supporting_text(&query_embedding).await?;
                PromptBuilder::build_rag_messages(message, &supporting_text)
            }
            PipelineMode::Plain => PromptBuilder::build_plain_messages(message),
        };

        self.generate(&messages).await
    }

    async fn embed_query(embedder: &dyn EmbeddingProvider, message: &str) -> Result<Vec<f32>> {
        let embedding = embedder.embed(message).await?;
        if embedding.is_empty() {
            return Err(Error::embedding("Embedding provider returned an empty vector"));
        }
        tracing::debug!("Embedded query with {}", embedder.name());
        Ok(embedding)
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        let completion = self.completion.complete(messages, &self.sampling).await?;
        Ok(ChatReply {
            model: completion.model,
            reply: completion.content,
        })
    }

    /// Whether the vector store is reachable (always true in plain mode)
    pub async fn is_ready(&self) -> bool {
        match &self.mode {
            PipelineMode::Rag { retriever, .. } => {
                retriever.health_check().await.unwrap_or(false)
            }
            PipelineMode::Plain => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{EchoCompletion, FailingEmbedder, FixedEmbedder};
    use crate::providers::{InMemoryVectorStore, Role, VectorStoreProvider};
    use crate::types::{CollectionSchema, Distance, VectorRecord};

    const COLLECTION: &str = "kb";

    async fn store_with(records: &[VectorRecord]) -> Arc<InMemoryVectorStore> {
        let store = Arc::new(InMemoryVectorStore::new());
        store
            .create_collection(&CollectionSchema {
                name: COLLECTION.to_string(),
                dimensions: 3,
                distance: Distance::Dot,
            })
            .await
            .unwrap();
        store.upsert(COLLECTION, records).await.unwrap();
        store
    }

    fn rag_pipeline(
        store: Arc<InMemoryVectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        completion: Arc<EchoCompletion>,
    ) -> ChatPipeline {
        ChatPipeline::rag(embedder, ContextRetriever::new(store, COLLECTION, 2), completion)
    }

    #[tokio::test]
    async fn test_refund_policy_scenario() {
        let store = store_with(&[VectorRecord::new(
            1,
            vec![0.2, 0.4, 0.6],
            "Refunds are processed within 14 days.",
        )])
        .await;
        let embedder = Arc::new(FixedEmbedder::new(vec![0.2, 0.4, 0.6]));
        let completion = Arc::new(EchoCompletion::new("gpt-4o"));
        let pipeline = rag_pipeline(store, embedder.clone(), completion.clone());

        let reply = pipeline.answer("What is the refund policy?").await.unwrap();

        assert_eq!(reply.model, "gpt-4o");
        assert!(reply.reply.contains("14 days"));
        assert_eq!(embedder.calls.lock().as_slice(), ["What is the refund policy?"]);
    }

    #[tokio::test]
    async fn test_prompt_and_sampling_sent_to_completion() {
        let store = store_with(&[
            VectorRecord::new(1, vec![1.0, 0.0, 0.0], "best match"),
            VectorRecord::new(2, vec![0.5, 0.0, 0.0], "runner up"),
        ])
        .await;
        let completion = Arc::new(EchoCompletion::new("gpt-4o"));
        let pipeline = rag_pipeline(
            store,
            Arc::new(FixedEmbedder::new(vec![1.0, 0.0, 0.0])),
            completion.clone(),
        );

        pipeline.answer("where?").await.unwrap();

        let prompts = completion.prompts.lock();
        let (messages, sampling) = &prompts[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "You are a helpful RAG assistant.");
        assert!(messages[1].content.contains("user query: where?"));
        assert!(messages[1].content.contains("supporting_text: best match"));
        assert!(!messages[1].content.contains("runner up"));
        assert_eq!(*sampling, SamplingParams::default());
        assert_eq!(sampling.max_tokens, 8192);
    }

    #[tokio::test]
    async fn test_empty_collection_yields_no_supporting_context() {
        let store = store_with(&[]).await;
        let completion = Arc::new(EchoCompletion::new("gpt-4o"));
        let pipeline = rag_pipeline(
            store,
            Arc::new(FixedEmbedder::new(vec![1.0, 0.0, 0.0])),
            completion.clone(),
        );

        let result = pipeline.answer("anything").await;

        assert!(matches!(result, Err(Error::NoSupportingContext)));
        assert!(completion.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_is_accepted() {
        let store = store_with(&[VectorRecord::new(1, vec![1.0, 0.0, 0.0], "ctx")]).await;
        let embedder = Arc::new(FixedEmbedder::new(vec![1.0, 0.0, 0.0]));
        let pipeline = rag_pipeline(store, embedder.clone(), Arc::new(EchoCompletion::new("m")));

        pipeline.answer("").await.unwrap();
        assert_eq!(embedder.calls.lock().as_slice(), [""]);
    }

    #[tokio::test]
    async fn test_embedding_failure_stops_pipeline() {
        let store = store_with(&[VectorRecord::new(1, vec![1.0, 0.0, 0.0], "ctx")]).await;
        let completion = Arc::new(EchoCompletion::new("gpt-4o"));
        let pipeline = rag_pipeline(store, Arc::new(FailingEmbedder), completion.clone());

        let result = pipeline.answer("hello").await;

        assert!(matches!(result, Err(Error::Embedding(_))));
        assert!(completion.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_dimension_mismatch_fails_search() {
        let store = store_with(&[VectorRecord::new(1, vec![1.0, 0.0, 0.0], "ctx")]).await;
        let pipeline = rag_pipeline(
            store,
            Arc::new(FixedEmbedder::new(vec![1.0, 0.0])),
            Arc::new(EchoCompletion::new("gpt-4o")),
        );

        let result = pipeline.answer("hello").await;
        assert!(matches!(result, Err(Error::VectorDb(_))));
    }

    #[tokio::test]
    async fn test_plain_mode_skips_retrieval() {
        let completion = Arc::new(EchoCompletion::new("gpt-4o"));
        let pipeline = ChatPipeline::plain(completion.clone());

        let reply = pipeline.answer("Tell me a joke").await.unwrap();

        assert_eq!(pipeline.mode(), ChatMode::Plain);
        assert_eq!(reply.reply, "Tell me a joke");
        let prompts = completion.prompts.lock();
        assert_eq!(prompts[0].0[0].content, "You are a helpful assistant.");
    }
}
