use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::history::view::{
    detail_view, list_view, HistoryDetailView, HistoryListView, CLEARED_MESSAGE,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
}

/// GET /api/v1/history
pub async fn handle_list_history(State(state): State<AppState>) -> Json<HistoryListView> {
    Json(list_view(&state.history.list()))
}

/// GET /api/v1/history/:id
pub async fn handle_get_history_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HistoryDetailView>, AppError> {
    let entry = state
        .history
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))?;
    Ok(Json(detail_view(&entry)))
}

/// DELETE /api/v1/history?confirm=true
///
/// Destructive and irreversible, so the caller must confirm explicitly.
pub async fn handle_clear_history(
    State(state): State<AppState>,
    Query(params): Query<ClearQuery>,
) -> Result<Json<ClearResponse>, AppError> {
    if !params.confirm {
        return Err(AppError::ConfirmationRequired(
            "Are you sure you want to clear all history? Repeat with confirm=true".to_string(),
        ));
    }
    state.history.clear();
    Ok(Json(ClearResponse {
        message: CLEARED_MESSAGE,
    }))
}
