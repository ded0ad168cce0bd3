use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{cache::CatalogSummary, error::AppResult, middleware::RequestId, routes::AppState};

/// Describes the catalog currently served
pub async fn info(State(state): State<Arc<AppState>>) -> AppResult<Json<CatalogSummary>> {
    let catalog = state.catalog.get().await?;
    Ok(Json(catalog.summary()))
}

/// Forces a reload from the configured source
pub async fn reload(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<CatalogSummary>> {
    tracing::info!(
        request_id = %request_id,
        source = %state.catalog.source_description(),
        "Catalog reload requested"
    );

    let catalog = state.catalog.reload().await?;
    Ok(Json(catalog.summary()))
}
