//! Export lookup endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::StoredExport;
use crate::AppState;

/// GET /api/exports/:session_key
pub async fn get(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
) -> Result<Json<StoredExport>> {
    let stored = state
        .exporter()
        .fetch(&session_key)?
        .ok_or_else(|| ApiError::NotFound(session_key))?;
    Ok(Json(stored))
}
