//! Prompt templates for chat generation

use crate::providers::llm::ChatMessage;

/// System prompt for retrieval-augmented answers
pub const RAG_SYSTEM_PROMPT: &str = "You are a helpful RAG assistant.";

/// System prompt for direct answers
pub const PLAIN_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Prompt builder for chat completions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Two-message prompt carrying the query and the retrieved text
    ///
    /// Both strings are inserted verbatim, without escaping.
    pub fn build_rag_messages(query: &str, supporting_text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(RAG_SYSTEM_PROMPT),
            ChatMessage::user(Self::build_rag_user_prompt(query, supporting_text)),
        ]
    }

    /// User turn of the RAG prompt
    pub fn build_rag_user_prompt(query: &str, supporting_text: &str) -> String {
        format!(
            "answer the user query using the provided supporting knowledge\n\
             user query: {query}\n\
             supporting_text: {supporting_text}",
            query = query,
            supporting_text = supporting_text
        )
    }

    /// Two-message prompt forwarding the user's message unchanged
    pub fn build_plain_messages(message: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(PLAIN_SYSTEM_PROMPT),
            ChatMessage::user(message),
        ]
    }
}
