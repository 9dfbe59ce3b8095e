//! Scripted providers for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{ChatMessage, Completion, CompletionProvider, SamplingParams};

/// Returns the same vector for every input and records what it was asked
pub struct FixedEmbedder {
    vector: Vec<f32>,
    pub calls: Mutex<Vec<String>>,
}

impl FixedEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.lock().push(text.to_string());
        Ok(self.vector.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Always fails like an upstream outage
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::embedding("Embedding failed: HTTP 401 Unauthorized"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Replies with the last user message, so replies contain the prompt's facts
pub struct EchoCompletion {
    model: String,
    pub prompts: Mutex<Vec<(Vec<ChatMessage>, SamplingParams)>>,
}

impl EchoCompletion {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionProvider for EchoCompletion {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> Result<Completion> {
        self.prompts.lock().push((messages.to_vec(), *sampling));
        let content = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(Completion {
            model: self.model.clone(),
            content,
        })
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
