//! Provider abstractions for embeddings, completions, and vector storage
//!
//! Each external collaborator sits behind a trait so the chat pipeline and
//! the loader can be built from any combination of backends.

pub mod azure_openai;
pub mod embedding;
pub mod llm;
pub mod local;
pub mod qdrant;
pub mod vector_store;

pub use azure_openai::AzureOpenAiClient;
pub use embedding::EmbeddingProvider;
pub use llm::{ChatMessage, Completion, CompletionProvider, Role, SamplingParams};
pub use local::InMemoryVectorStore;
pub use qdrant::QdrantStore;
pub use vector_store::VectorStoreProvider;

#[cfg(test)]
pub(crate) mod testing;
