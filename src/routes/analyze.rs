use axum::{body::Bytes, extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    analysis::decode_image,
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::SkinAnalysis,
    routes::AppState,
};

/// Handler for photo analysis; the body is the raw image
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<SkinAnalysis>> {
    if body.is_empty() {
        return Err(AppError::InvalidInput("Request body must contain an image".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        bytes = body.len(),
        "Processing analysis request"
    );

    let analyzer = state.analyzer.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        let image = decode_image(&body)?;
        Ok::<_, AppError>(analyzer.analyze(&image))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))??;

    tracing::info!(
        request_id = %request_id,
        skin_tone = ?analysis.skin_tone,
        acne_level = analysis.acne_level.level(),
        "Analysis completed"
    );

    Ok(Json(analysis))
}
