//! Retrieval of supporting context for chat answers

pub mod search;

pub use search::ContextRetriever;
