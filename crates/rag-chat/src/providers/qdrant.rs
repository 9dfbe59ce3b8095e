//! Qdrant vector store over the REST API
//!
//! Uses the collection and point endpoints directly with reqwest rather than
//! a client SDK. Point ids are unsigned integers.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::providers::vector_store::VectorStoreProvider;
use crate::types::{
    CollectionSchema, Distance, RecordPayload, SearchMatch, SearchParams, VectorRecord,
};

/// Qdrant REST provider
pub struct QdrantStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Envelope every Qdrant response is wrapped in
#[derive(Deserialize)]
struct QdrantResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct ExistsResult {
    exists: bool,
}

#[derive(Deserialize)]
struct CountResult {
    count: usize,
}

#[derive(Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: Distance,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    points: &'a [VectorRecord],
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a [f32],
    limit: usize,
    with_payload: bool,
    with_vector: bool,
}

#[derive(Serialize)]
struct CountRequest {
    exact: bool,
}

#[derive(Deserialize)]
struct QueryResult {
    points: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Option<RecordPayload>,
    #[serde(default)]
    vector: Option<Value>,
}

impl ScoredPoint {
    fn into_match(self) -> Result<SearchMatch> {
        let id = self.id.as_u64().ok_or_else(|| {
            Error::vector_db(format!("Unsupported point id in search result: {}", self.id))
        })?;

        // Named vectors come back as an object; only the unnamed form is kept.
        let vector = self
            .vector
            .and_then(|v| serde_json::from_value::<Vec<f32>>(v).ok());

        Ok(SearchMatch {
            id,
            score: self.score,
            payload: self.payload,
            vector,
        })
    }
}

impl QdrantStore {
    /// Create a new Qdrant provider
    pub fn new(config: &VectorDbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "{} failed: HTTP {} - {}",
                what, status, body
            )));
        }

        let envelope: QdrantResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse {} response: {}", what, e)))?;

        Ok(envelope.result)
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn collection_exists(&self, collection: &str) -> Result<bool> {
        let builder = self.request(Method::GET, &format!("/collections/{}/exists", collection));
        let result: ExistsResult = self.send(builder, "Collection exists").await?;
        Ok(result.exists)
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> Result<()> {
        let body = CreateCollectionRequest {
            vectors: VectorParams {
                size: schema.dimensions,
                distance: schema.distance,
            },
        };
        let builder = self
            .request(Method::PUT, &format!("/collections/{}", schema.name))
            .json(&body);
        let _: Value = self.send(builder, "Create collection").await?;

        tracing::info!(
            "Created Qdrant collection '{}' ({} dims, {:?})",
            schema.name,
            schema.dimensions,
            schema.distance
        );
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[VectorRecord]) -> Result<()> {
        let builder = self
            .request(Method::PUT, &format!("/collections/{}/points", collection))
            .query(&[("wait", "true")])
            .json(&UpsertRequest { points: records });
        let _: Value = self.send(builder, "Upsert").await?;

        tracing::debug!("Upserted {} points into '{}'", records.len(), collection);
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &[f32],
        params: SearchParams,
    ) -> Result<Vec<SearchMatch>> {
        let body = QueryRequest {
            query,
            limit: params.limit,
            with_payload: params.with_payload,
            with_vector: params.with_vector,
        };
        let builder = self
            .request(Method::POST, &format!("/collections/{}/points/query", collection))
            .json(&body);
        let result: QueryResult = self.send(builder, "Query points").await?;

        result.points.into_iter().map(ScoredPoint::into_match).collect()
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let builder = self
            .request(Method::POST, &format!("/collections/{}/points/count", collection))
            .json(&CountRequest { exact: true });
        let result: CountResult = self.send(builder, "Count points").await?;
        Ok(result.count)
    }

    async fn health_check(&self) -> Result<bool> {
        match self.request(Method::GET, "/healthz").send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
