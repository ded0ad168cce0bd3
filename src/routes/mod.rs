use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    cache::CatalogCache,
    middleware::{request_id::make_span_with_request_id, request_id_middleware},
    services::ranking::DEFAULT_COUNT,
};

pub mod catalog;
pub mod movies;
pub mod recommendations;

/// Shared state handed to every handler
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
    /// Recommendations returned when a request omits `count`
    pub default_count: usize,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogCache>) -> Self {
        Self {
            catalog,
            default_count: DEFAULT_COUNT,
        }
    }

    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/recommendations", post(recommendations::recommend))
        .route("/catalog", get(catalog::info))
        .route("/catalog/reload", post(catalog::reload))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
