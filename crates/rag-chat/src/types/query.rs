//! Inbound request types

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
///
/// A missing `message` deserializes to the empty string; empty messages are
/// not rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatQuery {
    /// The user's message
    #[serde(default)]
    pub message: String,
}

impl ChatQuery {
    /// Create a new query
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `POST /add-vector`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddVectorRequest {
    /// Embedding to store
    pub vector: Vec<f32>,
    /// Payload text (defaults to empty)
    #[serde(default)]
    pub text: Option<String>,
    /// Explicit point id; generated when absent
    #[serde(default)]
    pub id: Option<u64>,
}
