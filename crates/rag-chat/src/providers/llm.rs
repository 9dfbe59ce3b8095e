//! Completion provider trait for chat-style generation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::Result;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling configuration sent with every completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Result of a completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Model name reported by the endpoint
    pub model: String,
    /// Text of the top choice
    pub content: String,
}

/// Trait for chat completion
///
/// Implementations:
/// - `AzureOpenAiClient`: Azure OpenAI chat completions deployment
///
/// Each call is independent; no conversation state is kept between calls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete the given messages
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> Result<Completion>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the configured model
    fn model(&self) -> &str;
}
