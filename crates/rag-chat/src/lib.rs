//! rag-chat: retrieval-augmented chat backend and vector loader
//!
//! The chat backend embeds each message, looks up the closest stored text in
//! a vector collection, and asks a hosted chat model to answer with that text
//! as supporting knowledge. The vector loader seeds the collection once and
//! accepts single-record inserts afterwards.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::{ChatMode, RagConfig};
pub use error::{Error, Result};
pub use pipeline::ChatPipeline;
pub use types::{
    query::{AddVectorRequest, ChatQuery},
    response::{AddVectorResponse, ChatReply},
};
