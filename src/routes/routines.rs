use axum::{extract::Path, Json};

use crate::{models::RoutineResponse, services::routine::plan_routine};

/// Handler for routine lookup; unknown skin types get an empty step list
pub async fn routine(Path(skin_type): Path<String>) -> Json<RoutineResponse> {
    let steps = plan_routine(&skin_type);
    Json(RoutineResponse { skin_type, steps })
}
