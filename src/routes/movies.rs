use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState};

/// Lists movie names in catalog order, without duplicates
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    let catalog = state.catalog.get().await?;
    Ok(Json(catalog.names()))
}
