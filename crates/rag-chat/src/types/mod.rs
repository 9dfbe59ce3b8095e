//! Core types for the chat backend and vector loader

pub mod query;
pub mod record;
pub mod response;

pub use query::{AddVectorRequest, ChatQuery};
pub use record::{
    CollectionSchema, Distance, RecordPayload, SearchMatch, SearchParams, VectorRecord,
};
pub use response::{AddVectorResponse, ChatReply};
