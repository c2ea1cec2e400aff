use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use plm_model::{ChildSummary, ObjectId, PartCreationRequest};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/basic_objects`
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let catalog = state.catalog.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(json!({ "basic_objects": catalog.all() })))
}

/// `GET /api/basic_object?name=<q>`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, StatusCode> {
    let catalog = state.catalog.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let found = catalog.search(params.name.as_deref().unwrap_or_default());
    tracing::info!("Search {:?}: {} match(es)", params.name, found.len());
    Ok(Json(json!({ "basic_objects": found })))
}

/// `GET /api/basic_object/{id}`
pub async fn get_object(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let catalog = state.catalog.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    catalog.get(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/basic_object/{id}/children`
pub async fn children(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChildSummary>>, StatusCode> {
    let catalog = state.catalog.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    catalog.children(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/basic_object/{id}/parents`
pub async fn parents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ObjectId>>, StatusCode> {
    let catalog = state.catalog.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    catalog.parents(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/basic_object/`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<PartCreationRequest>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut catalog = state.catalog.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(catalog.create(&request))))
}

/// `PATCH /api/basic_object/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PartCreationRequest>,
) -> Result<Json<Value>, StatusCode> {
    let mut catalog = state.catalog.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    catalog.update(&id, &request).map(Json).ok_or(StatusCode::NOT_FOUND)
}
