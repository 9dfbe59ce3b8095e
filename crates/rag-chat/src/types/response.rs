//! Outbound response types

use serde::{Deserialize, Serialize};

/// Body returned by `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// Model name as resolved by the completion endpoint
    pub model: String,
    /// Text of the top completion choice
    pub reply: String,
}

/// Body returned by a successful `POST /add-vector`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddVectorResponse {
    /// Always `"success"`
    pub status: String,
    /// Id the record was stored under
    pub id: u64,
}

impl AddVectorResponse {
    /// Successful insertion under `id`
    pub fn success(id: u64) -> Self {
        Self {
            status: "success".to_string(),
            id,
        }
    }
}
