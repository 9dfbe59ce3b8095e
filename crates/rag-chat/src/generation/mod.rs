//! Prompt construction for chat completions

pub mod prompt;

pub use prompt::{PromptBuilder, PLAIN_SYSTEM_PROMPT, RAG_SYSTEM_PROMPT};
