use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::results::{classify, ingest, ResultsView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct IngestQuery {
    /// Upload kept server-side so the user can retry with their own key.
    pub existing_filename: Option<String>,
}

/// POST /api/v1/results
///
/// Accepts any JSON body; fields that are missing or malformed fall back to
/// their defaults and the body itself is kept as received.
pub async fn handle_ingest_result(
    State(state): State<AppState>,
    Query(params): Query<IngestQuery>,
    Json(payload): Json<Value>,
) -> Json<ResultsView> {
    Json(ingest(
        AnalysisResult::from(payload),
        params.existing_filename,
        &state.history,
        &state.loader,
        &state.current,
    ))
}

/// GET /api/v1/results/current
pub async fn handle_current_result(
    State(state): State<AppState>,
) -> Result<Json<ResultsView>, AppError> {
    let result = state
        .current
        .get()
        .ok_or_else(|| AppError::NotFound("No results to display".to_string()))?;
    Ok(Json(classify(&result, None)))
}
