//! Azure OpenAI client for embeddings and chat completions
//!
//! Talks to the deployment-scoped REST endpoints directly:
//! `{endpoint}/openai/deployments/{deployment}/{embeddings|chat/completions}?api-version=...`.
//! No retry or backoff; upstream failures surface as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AzureOpenAiConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{ChatMessage, Completion, CompletionProvider, SamplingParams};

/// Azure OpenAI REST client
pub struct AzureOpenAiClient {
    client: Client,
    config: AzureOpenAiConfig,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    #[serde(flatten)]
    sampling: SamplingParams,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl AzureOpenAiClient {
    /// Create a new client
    pub fn new(config: &AzureOpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }

    /// Deployment-scoped URL for an operation
    fn deployment_url(&self, deployment: &str, operation: &str) -> Result<String> {
        if self.config.endpoint.is_empty() {
            return Err(Error::Config("AZURE_API_URL is not set".to_string()));
        }
        if deployment.is_empty() {
            return Err(Error::Config(format!(
                "No deployment configured for {}",
                operation
            )));
        }
        Ok(format!(
            "{}/openai/deployments/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            deployment,
            operation
        ))
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl EmbeddingProvider for AzureOpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.deployment_url(&self.config.embedding_model, "embeddings")?;

        let response = self
            .post(&url, &EmbeddingRequest { input: text })
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::embedding("No embedding in response"))?;

        tracing::debug!("Generated {}-dimensional embedding", embedding.len());
        Ok(embedding)
    }

    fn name(&self) -> &str {
        "azure-openai"
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> Result<Completion> {
        let url = self.deployment_url(&self.config.model, "chat/completions")?;

        tracing::info!("Generating completion with model: {}", self.config.model);

        let request = ChatCompletionRequest {
            messages,
            model: &self.config.model,
            sampling: *sampling,
        };

        let response = self
            .post(&url, &request)
            .await
            .map_err(|e| Error::llm(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Completion failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse completion response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::llm("No text in completion response"))?;

        Ok(Completion {
            model: parsed.model,
            content,
        })
    }

    fn name(&self) -> &str {
        "azure-openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AzureOpenAiConfig {
        AzureOpenAiConfig {
            endpoint: format!("{}/", server.uri()),
            api_key: "test-key".to_string(),
            model: "gpt-4o".to_string(),
            ..AzureOpenAiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_embed_posts_to_embedding_deployment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/text-embedding-ada-002/embeddings"))
            .and(query_param("api-version", "2024-12-01-preview"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(json!({ "input": "refund policy" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [{ "object": "embedding", "index": 0, "embedding": [0.25, -0.5, 1.0] }],
                "model": "text-embedding-ada-002"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::new(&config_for(&server)).unwrap();
        let embedding = client.embed("refund policy").await.unwrap();

        assert_eq!(embedding, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_surfaces_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::new(&config_for(&server)).unwrap();
        let err = client.embed("anything").await.unwrap_err();

        match err {
            Error::Embedding(message) => {
                assert!(message.contains("429"));
                assert!(message.contains("rate limited"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_sampling_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "max_tokens": 8192,
                "top_p": 0.95,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0,
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hi" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o-2024-11-20",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "Hello!" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::new(&config_for(&server)).unwrap();
        let completion = client
            .complete(
                &[ChatMessage::system("be brief"), ChatMessage::user("hi")],
                &SamplingParams::default(),
            )
            .await
            .unwrap();

        assert_eq!(completion.model, "gpt-4o-2024-11-20");
        assert_eq!(completion.content, "Hello!");
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "model": "gpt-4o", "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::new(&config_for(&server)).unwrap();
        let result = client
            .complete(&[ChatMessage::user("hi")], &SamplingParams::default())
            .await;

        assert!(matches!(result, Err(Error::Llm(_))));
    }

    #[tokio::test]
    async fn test_missing_endpoint_fails_at_first_use() {
        let client = AzureOpenAiClient::new(&AzureOpenAiConfig::default()).unwrap();
        let result = client.embed("hello").await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
