//! Vector collection types shared by the chat backend and the loader

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Similarity metric of a collection, fixed at creation time
///
/// Serialized with Qdrant's spelling.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Distance {
    /// Dot product
    #[default]
    Dot,
    /// Cosine similarity
    Cosine,
    /// Euclidean distance
    Euclid,
}

/// Name, dimensionality and metric of the vector collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Collection name
    pub name: String,
    /// Vector length every record and query must have
    pub dimensions: usize,
    /// Similarity metric
    pub distance: Distance,
}

impl CollectionSchema {
    /// Check a vector against the declared dimensionality
    pub fn check_dimensions(&self, vector: &[f32]) -> crate::Result<()> {
        if vector.len() != self.dimensions {
            return Err(crate::Error::vector_db(format!(
                "collection '{}' expects vectors of length {}, got {}",
                self.name,
                self.dimensions,
                vector.len()
            )));
        }
        Ok(())
    }
}

/// Payload stored alongside each vector
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordPayload {
    /// Supporting text handed to the completion model
    #[serde(default)]
    pub text: String,
    /// Any other payload keys, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordPayload {
    /// Payload carrying only `text`
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// A stored point: id, vector and payload
///
/// Records are never mutated in place; an upsert with the same id replaces
/// the whole record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    /// Unique id within the collection
    pub id: u64,
    /// Embedding
    pub vector: Vec<f32>,
    /// Payload
    pub payload: RecordPayload,
}

impl VectorRecord {
    /// Create a record with a text-only payload
    pub fn new(id: u64, vector: Vec<f32>, text: impl Into<String>) -> Self {
        Self {
            id,
            vector,
            payload: RecordPayload::text(text),
        }
    }
}

/// What a similarity search should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum number of matches
    pub limit: usize,
    /// Include stored vectors in the matches
    pub with_vector: bool,
    /// Include payloads in the matches
    pub with_payload: bool,
}

impl SearchParams {
    /// Top-`limit` search returning vectors and payloads
    pub fn top(limit: usize) -> Self {
        Self {
            limit,
            with_vector: true,
            with_payload: true,
        }
    }
}

/// One nearest-neighbour match
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    /// Point id
    pub id: u64,
    /// Similarity score, higher is closer
    pub score: f32,
    /// Payload, when requested
    pub payload: Option<RecordPayload>,
    /// Stored vector, when requested
    pub vector: Option<Vec<f32>>,
}

impl SearchMatch {
    /// Payload text, empty when the payload was absent or had no `text`
    pub fn text(&self) -> &str {
        self.payload.as_ref().map(|p| p.text.as_str()).unwrap_or("")
    }
}
