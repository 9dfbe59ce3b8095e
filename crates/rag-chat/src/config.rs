//! Configuration for the chat backend and vector loader
//!
//! Every setting has a default; `RagConfig::from_env` overlays whatever the
//! process environment provides. Required upstream settings (endpoint, key,
//! model) are not validated here and fail at first use instead.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::types::{CollectionSchema, Distance};

/// Default Azure OpenAI API version
pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";
/// Default embedding deployment
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
/// Default Qdrant URL
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";
/// Collection shared by the chat backend and the loader
pub const DEFAULT_COLLECTION: &str = "margies_travel_embeddings";
/// Output length of text-embedding-ada-002
pub const DEFAULT_DIMENSIONS: usize = 1536;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RagConfig {
    /// How `/chat` answers (retrieval-augmented or direct)
    #[serde(default)]
    pub mode: ChatMode,
    /// Server configuration
    pub server: ServerConfig,
    /// Azure OpenAI configuration (embeddings + completions)
    pub azure: AzureOpenAiConfig,
    /// Vector database configuration
    pub vector_db: VectorDbConfig,
    /// Vector loader configuration
    pub loader: LoaderConfig,
}

impl RagConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = parsed(&lookup, "CHAT_MODE") {
            config.mode = mode;
        }

        // Server
        if let Some(host) = lookup("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parsed(&lookup, "SERVER_PORT") {
            config.server.port = port;
        }
        if let Some(enable_cors) = parsed(&lookup, "ENABLE_CORS") {
            config.server.enable_cors = enable_cors;
        }

        // Azure OpenAI
        if let Some(endpoint) = lookup("AZURE_API_URL") {
            config.azure.endpoint = endpoint;
        }
        if let Some(api_key) = lookup("AZURE_API_KEY") {
            config.azure.api_key = api_key;
        }
        if let Some(model) = lookup("AZURE_MODEL_NAME") {
            config.azure.model = model;
        }
        if let Some(api_version) = lookup("AZURE_API_VERSION") {
            config.azure.api_version = api_version;
        }
        if let Some(embedding_model) = lookup("EMBEDDING_MODEL_NAME") {
            config.azure.embedding_model = embedding_model;
        }
        if let Some(timeout) = parsed(&lookup, "REQUEST_TIMEOUT_SECS") {
            config.azure.timeout_secs = timeout;
            config.vector_db.timeout_secs = timeout;
        }

        // Qdrant
        if let Some(url) = lookup("QDRANT_CLIENT_URL") {
            config.vector_db.url = url;
        }
        config.vector_db.api_key = lookup("QDRANT_API_KEY").filter(|k| !k.is_empty());

        // Loader
        if let Some(port) = parsed(&lookup, "VECTOR_LOADER_PORT") {
            config.loader.port = port;
        }
        if let Some(seed_file) = lookup("VECTOR_SEED_FILE") {
            config.loader.seed_file = PathBuf::from(seed_file);
        }
        if let Some(delay) = parsed(&lookup, "VECTOR_LOADER_STARTUP_DELAY_SECS") {
            config.loader.startup_delay_secs = delay;
        }

        config
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            None
        }
    }
}

/// How the chat endpoint produces an answer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Embed, search, then complete with the retrieved text
    #[default]
    Rag,
    /// Forward the message straight to the completion model
    Plain,
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rag" => Ok(Self::Rag),
            "plain" => Ok(Self::Plain),
            other => Err(format!("unknown chat mode: {}", other)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

/// Azure OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Chat completion deployment name
    pub model: String,
    /// REST API version
    pub api_version: String,
    /// Embedding deployment name
    pub embedding_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Vector database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Qdrant base URL
    pub url: String,
    /// Optional Qdrant API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Collection name, dimensionality and metric
    pub collection: CollectionSchema,
    /// Matches returned per chat query
    pub search_limit: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_QDRANT_URL.to_string(),
            api_key: None,
            collection: CollectionSchema {
                name: DEFAULT_COLLECTION.to_string(),
                dimensions: DEFAULT_DIMENSIONS,
                distance: Distance::Dot,
            },
            search_limit: 2,
            timeout_secs: 120,
        }
    }
}

/// Vector loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Port for the `/add-vector` service
    pub port: u16,
    /// JSON file of `{vector, text}` entries loaded on first start
    pub seed_file: PathBuf,
    /// Wait before touching the vector store at startup
    pub startup_delay_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            port: 5173,
            seed_file: PathBuf::from("data.json"),
            startup_delay_secs: 20,
        }
    }
}
