use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    analysis::SkinAnalyzer,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::RecommendationService,
};

pub mod analyze;
pub mod recommendations;
pub mod routines;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub analyzer: SkinAnalyzer,
    pub recommender: RecommendationService,
    /// Body limit for image uploads, in bytes
    pub max_upload_bytes: usize,
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(upload_limit))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// API routes under /api/v1
fn api_routes(upload_limit: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/analyze",
            post(analyze::analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/routines/:skin_type", get(routines::routine))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
