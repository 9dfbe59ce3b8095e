//! HTTP servers for the chat backend and the vector loader

pub mod routes;
pub mod state;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::ingestion::PreloadOutcome;
use state::{ChatState, LoaderState};

/// Chat backend HTTP server
pub struct ChatServer {
    config: RagConfig,
    state: ChatState,
}

impl ChatServer {
    /// Create a new chat server
    pub fn new(config: RagConfig) -> Result<Self> {
        let state = ChatState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create from prepared state
    pub fn from_state(state: ChatState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness))
            .merge(routes::chat_routes())
            .with_state(self.state.clone());

        with_layers(router, self.config.server.enable_cors)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let router = self.build_router();
        serve(&self.address(), router, "chat backend").await
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Vector loader HTTP server
pub struct LoaderServer {
    config: RagConfig,
    state: LoaderState,
}

impl LoaderServer {
    /// Create a new loader server
    pub fn new(config: RagConfig) -> Result<Self> {
        let state = LoaderState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create from prepared state
    pub fn from_state(state: LoaderState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Run the startup preload
    pub async fn preload(&self) -> Result<PreloadOutcome> {
        self.state.loader().preload().await
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(health_check))
            .merge(routes::loader_routes())
            .with_state(self.state.clone());

        with_layers(router, self.config.server.enable_cors)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let router = self.build_router();
        serve(&self.address(), router, "vector loader").await
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.loader.port)
    }
}

fn with_layers(router: Router, enable_cors: bool) -> Router {
    // Applied bottom to top: CORS is outermost
    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

async fn serve(address: &str, router: Router, what: &str) -> Result<()> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

    tracing::info!("Starting {} on http://{}", what, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint
async fn readiness(State(state): State<ChatState>) -> StatusCode {
    if state.pipeline().is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ChatPipeline;
    use crate::providers::testing::{EchoCompletion, FixedEmbedder};
    use crate::providers::QdrantStore;
    use crate::retrieval::ContextRetriever;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plain_server() -> ChatServer {
        let pipeline = ChatPipeline::plain(Arc::new(EchoCompletion::new("gpt-4o")));
        ChatServer::from_state(ChatState::from_parts(RagConfig::default(), pipeline))
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let router = plain_server().build_router();

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let ready = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
    }

    async fn rag_server_against(qdrant: &wiremock::MockServer) -> ChatServer {
        let mut config = RagConfig::default();
        config.vector_db.url = qdrant.uri();
        let store = Arc::new(QdrantStore::new(&config.vector_db).unwrap());
        let pipeline = ChatPipeline::rag(
            Arc::new(FixedEmbedder::new(vec![1.0, 0.0, 0.0])),
            ContextRetriever::new(store, "kb", 2),
            Arc::new(EchoCompletion::new("gpt-4o")),
        );
        ChatServer::from_state(ChatState::from_parts(config, pipeline))
    }

    async fn ready_status(server: &ChatServer) -> StatusCode {
        server
            .build_router()
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_ready_follows_vector_store_health() {
        let qdrant = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(200).set_body_string("healthz check passed"))
            .mount(&qdrant)
            .await;

        let server = rag_server_against(&qdrant).await;
        assert_eq!(ready_status(&server).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_when_vector_store_unhealthy() {
        let qdrant = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&qdrant)
            .await;

        let server = rag_server_against(&qdrant).await;
        assert_eq!(ready_status(&server).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_not_ready_when_vector_store_unreachable() {
        let qdrant = MockServer::start().await;
        let server = rag_server_against(&qdrant).await;
        drop(qdrant);

        assert_eq!(ready_status(&server).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_addresses() {
        let config = RagConfig::default();
        let pipeline = ChatPipeline::plain(Arc::new(EchoCompletion::new("m")));
        let chat = ChatServer::from_state(ChatState::from_parts(config, pipeline));
        assert_eq!(chat.address(), "0.0.0.0:5000");
    }
}
