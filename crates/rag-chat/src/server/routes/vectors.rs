//! Single-vector insertion endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::Error;
use crate::server::state::LoaderState;
use crate::types::{AddVectorRequest, AddVectorResponse};

/// Failure of `/add-vector`, reported as `500 {"error": message}`
#[derive(Debug)]
pub struct AddVectorError(String);

impl From<Error> for AddVectorError {
    fn from(err: Error) -> Self {
        Self(err.to_string())
    }
}

impl From<JsonRejection> for AddVectorError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl IntoResponse for AddVectorError {
    fn into_response(self) -> Response {
        tracing::error!("add-vector failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0 })),
        )
            .into_response()
    }
}

/// POST /add-vector - Upsert one vector with optional text and id
pub async fn add_vector(
    State(state): State<LoaderState>,
    payload: std::result::Result<Json<AddVectorRequest>, JsonRejection>,
) -> std::result::Result<Json<AddVectorResponse>, AddVectorError> {
    let Json(request) = payload?;

    let id = state.loader().add_vector(request).await?;

    Ok(Json(AddVectorResponse::success(id)))
}
