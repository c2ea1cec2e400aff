//! Stand-in for the part-catalog service.
//!
//! Implements the `/api/basic_object` endpoints over an in-memory [`Catalog`].

use std::sync::{Arc, RwLock};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod catalog;
pub mod routes;

pub use catalog::Catalog;

#[derive(Clone, Default)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/basic_objects", get(routes::list))
        .route("/api/basic_object", get(routes::search).post(routes::create))
        .route("/api/basic_object/", post(routes::create))
        .route("/api/basic_object/{id}", get(routes::get_object).patch(routes::update))
        .route("/api/basic_object/{id}/children", get(routes::children))
        .route("/api/basic_object/{id}/parents", get(routes::parents))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
