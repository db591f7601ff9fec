//! Food request endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::db::RequestRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidObjectId};
use crate::http::server::AppState;
use crate::models::{
    document_to_json, documents_to_json, filter_from_query, object_to_document, DeleteResult,
    InsertResult,
};

/// POST /addrequest
async fn add_request(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<Map<String, Value>>,
) -> Result<Json<InsertResult>, ApiError> {
    let outcome = RequestRepo::new(state.store())
        .add(object_to_document(request))
        .await?;
    Ok(Json(outcome.into()))
}

/// GET /requests - requests matching the query string
async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let requests = RequestRepo::new(state.store())
        .list(filter_from_query(params))
        .await?;
    Ok(Json(documents_to_json(requests)))
}

/// GET /request/{id} - a single request, empty body when absent
async fn get_request(
    State(state): State<Arc<AppState>>,
    ValidObjectId { id, .. }: ValidObjectId,
) -> Result<Response, ApiError> {
    let request = RequestRepo::new(state.store()).get(id).await?;

    Ok(match request {
        Some(document) => Json(document_to_json(document)).into_response(),
        None => ().into_response(),
    })
}

/// PUT /request/{id} - merge fields into the request
///
/// Success means exactly one document changed. Setting values a request
/// already holds counts as not found.
async fn update_request(
    State(state): State<Arc<AppState>>,
    ValidObjectId { id, raw }: ValidObjectId,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<(StatusCode, String), ApiError> {
    let outcome = RequestRepo::new(state.store())
        .update_fields(id, object_to_document(fields))
        .await?;

    if outcome.modified_count == 1 {
        Ok((
            StatusCode::OK,
            format!("updatedFood with id {} updated successfully", raw),
        ))
    } else {
        Err(ApiError::NotFound {
            message: format!("updatedFood with id {} not found", raw),
        })
    }
}

/// DELETE /request/{id}
async fn delete_request(
    State(state): State<Arc<AppState>>,
    ValidObjectId { id, .. }: ValidObjectId,
) -> Result<Json<DeleteResult>, ApiError> {
    let outcome = RequestRepo::new(state.store()).delete(id).await?;
    Ok(Json(outcome.into()))
}

/// Request routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addrequest", post(add_request))
        .route("/requests", get(list_requests))
        .route(
            "/request/{id}",
            get(get_request).put(update_request).delete(delete_request),
        )
}
