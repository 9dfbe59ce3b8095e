//! Chat endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::ChatState;
use crate::types::{ChatQuery, ChatReply};

/// POST /chat - Answer a user message
pub async fn chat(
    State(state): State<ChatState>,
    payload: std::result::Result<Json<ChatQuery>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(query) = payload.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let start = Instant::now();

    tracing::info!("Chat message: \"{}\"", query.message);

    let reply = state.pipeline().answer(&query.message).await?;

    tracing::info!(
        "Chat completed in {}ms (model: {})",
        start.elapsed().as_millis(),
        reply.model
    );

    Ok(Json(reply))
}
