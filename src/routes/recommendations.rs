use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RankOutcome, RecommendationResponse},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Exact catalog name of the reference movie
    pub title: String,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let count = request.count.unwrap_or(state.default_count);
    if count == 0 {
        return Err(AppError::InvalidInput(
            "Count must be a positive integer".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        count,
        "Processing recommendation request"
    );

    let catalog = state.catalog.get().await?;

    match catalog.rank(&request.title, count) {
        RankOutcome::NotFound => Err(AppError::NotFound(format!(
            "Movie '{}' is not in the catalog",
            request.title
        ))),
        RankOutcome::Ranked(recommendations) => {
            tracing::info!(
                request_id = %request_id,
                returned = recommendations.len(),
                "Recommendations ranked"
            );

            Ok(Json(RecommendationResponse {
                reference: request.title,
                recommendations,
            }))
        }
    }
}
