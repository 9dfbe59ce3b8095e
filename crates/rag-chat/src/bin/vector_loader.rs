//! Vector loader binary
//!
//! Seeds the collection on first start, then serves `/add-vector`.
//! Run with: cargo run -p rag-chat --bin rag-vector-loader

use rag_chat::{config::RagConfig, ingestion::PreloadOutcome, server::LoaderServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Qdrant: {}", config.vector_db.url);
    tracing::info!("  - Collection: {}", config.vector_db.collection.name);
    tracing::info!("  - Seed file: {}", config.loader.seed_file.display());

    let server = LoaderServer::new(config)?;

    match server.preload().await? {
        PreloadOutcome::Created { inserted } => {
            tracing::info!("Preload finished: {} vectors inserted", inserted)
        }
        PreloadOutcome::AlreadyExists => tracing::info!("Preload skipped: collection exists"),
    }

    tracing::info!("  POST http://{}/add-vector", server.address());

    server.start().await?;

    Ok(())
}
