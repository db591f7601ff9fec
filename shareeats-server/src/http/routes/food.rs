//! Food listing endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::db::FoodRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidObjectId};
use crate::http::server::AppState;
use crate::models::{
    document_to_json, documents_to_json, filter_from_query, object_to_document, FoodUpdate,
    InsertResult, UpdateResult,
};

/// POST /addfood - insert a listing as sent
async fn add_food(
    State(state): State<Arc<AppState>>,
    JsonBody(listing): JsonBody<Map<String, Value>>,
) -> Result<Json<InsertResult>, ApiError> {
    let outcome = FoodRepo::new(state.store())
        .add(object_to_document(listing))
        .await?;
    Ok(Json(outcome.into()))
}

/// GET /allfood - every listing
async fn all_food(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let listings = FoodRepo::new(state.store()).all().await?;
    Ok(Json(documents_to_json(listings)))
}

/// GET /allfoodquntity - matching listings, largest quantity first
async fn food_by_quantity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let listings = FoodRepo::new(state.store())
        .by_quantity(filter_from_query(params))
        .await
        .map_err(|e| ApiError::Listing {
            message: e.to_string(),
        })?;

    Ok(Json(documents_to_json(listings)))
}

/// GET /food/{id} - a single listing, empty body when absent
async fn get_food(
    State(state): State<Arc<AppState>>,
    ValidObjectId { id, .. }: ValidObjectId,
) -> Result<Response, ApiError> {
    let listing = FoodRepo::new(state.store()).get(id).await?;

    Ok(match listing {
        Some(document) => Json(document_to_json(document)).into_response(),
        None => ().into_response(),
    })
}

/// PUT /updatefood/{id} - overwrite the listing fields, creating it if needed
async fn update_food(
    State(state): State<Arc<AppState>>,
    ValidObjectId { id, .. }: ValidObjectId,
    JsonBody(update): JsonBody<FoodUpdate>,
) -> Result<Json<UpdateResult>, ApiError> {
    let outcome = FoodRepo::new(state.store()).upsert_listing(id, update).await?;
    Ok(Json(outcome.into()))
}

/// Food routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addfood", post(add_food))
        .route("/allfood", get(all_food))
        .route("/allfoodquntity", get(food_by_quantity))
        .route("/food/{id}", get(get_food))
        .route("/updatefood/{id}", put(update_food))
}
