//! Chat backend binary
//!
//! Run with: cargo run -p rag-chat --bin rag-chat-server

use rag_chat::{config::RagConfig, server::ChatServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Mode: {:?}", config.mode);
    tracing::info!("  - Completion model: {}", config.azure.model);
    tracing::info!("  - Embedding model: {}", config.azure.embedding_model);
    tracing::info!("  - Qdrant: {}", config.vector_db.url);
    tracing::info!("  - Collection: {}", config.vector_db.collection.name);

    if config.azure.endpoint.is_empty() || config.azure.api_key.is_empty() {
        tracing::warn!("AZURE_API_URL or AZURE_API_KEY is not set; chat requests will fail");
    }

    let server = ChatServer::new(config)?;

    tracing::info!("Endpoints:");
    tracing::info!("  POST http://{}/chat", server.address());
    tracing::info!("  GET  http://{}/health", server.address());

    server.start().await?;

    Ok(())
}
