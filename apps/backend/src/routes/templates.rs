//! Template endpoints

use axum::{extract::State, Json};

use crate::models::TemplateListResponse;
use crate::AppState;

/// GET /api/templates
pub async fn list(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let templates = state.registry.all_metadata().into_iter().cloned().collect();
    Json(TemplateListResponse { templates })
}
