use axum::{extract::State, Json};

use crate::loader::LoaderStatus;
use crate::state::AppState;

/// POST /api/v1/loading
/// Called when an analysis is submitted; supersedes any running session.
pub async fn handle_start_loading(State(state): State<AppState>) -> Json<LoaderStatus> {
    state.loader.start();
    Json(state.loader.status())
}

/// GET /api/v1/loading
pub async fn handle_loading_status(State(state): State<AppState>) -> Json<LoaderStatus> {
    Json(state.loader.status())
}

/// DELETE /api/v1/loading
pub async fn handle_stop_loading(State(state): State<AppState>) -> Json<LoaderStatus> {
    state.loader.stop();
    Json(state.loader.status())
}
