use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationResponse, SkinProfile},
    routes::AppState,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(profile): Json<SkinProfile>,
) -> AppResult<Json<RecommendationResponse>> {
    profile.validate()?;

    tracing::info!(
        request_id = %request_id,
        skin_type = %profile.skin_type,
        skin_tone = %profile.skin_tone,
        acne_level = profile.acne_level,
        sensitivity = profile.sensitivity,
        concerns = profile.concerns.len(),
        "Processing recommendation request"
    );

    let response = state.recommender.recommend(&profile).await;

    tracing::info!(
        request_id = %request_id,
        products = response.products.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}
