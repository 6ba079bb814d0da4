use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveToFileRequest {
    pub section: String,
    pub suffix: String,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct SaveToFileResponse {
    pub success: bool,
}

/// GET /api/data/:key
pub async fn handle_get_data(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .get_data(&key)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No data stored under '{key}'")))
}

/// PUT /api/data/:key
/// Edit mode only. A write under a section's key is folded into the mounted
/// section straight away.
pub async fn handle_put_data(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<StatusCode, AppError> {
    state.edit_context().require()?;
    state.store.save_data(&key, &value)?;
    if key.starts_with("about-") {
        state.about.lock().await.reload();
    } else if key.starts_with("projects-") {
        state.projects.lock().await.reload();
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/save-to-file
pub async fn handle_save_to_file(
    State(state): State<AppState>,
    Json(req): Json<SaveToFileRequest>,
) -> Result<Json<SaveToFileResponse>, AppError> {
    state.edit_context().require()?;
    state
        .store
        .save_to_file(&req.section, &req.suffix, &req.data)
        .await?;
    Ok(Json(SaveToFileResponse { success: true }))
}
