//! API routes for the chat backend and the vector loader

pub mod query;
pub mod vectors;

use axum::{routing::post, Router};
use crate::server::state::{ChatState, LoaderState};

/// Routes served by the chat backend
pub fn chat_routes() -> Router<ChatState> {
    Router::new().route("/chat", post(query::chat))
}

/// Routes served by the vector loader
pub fn loader_routes() -> Router<LoaderState> {
    Router::new().route("/add-vector", post(vectors::add_vector))
}
