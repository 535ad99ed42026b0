use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::export::cover_letter::{self, cover_letter_text, EMPTY_COVER_LETTER};
use crate::export::report::{self, render_report};
use crate::export::share_card::{self, render_png, ShareCard};
use crate::export::{ExportError, ExportGuard, ExportKind};
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

fn current_result(state: &AppState, missing: &str) -> Result<AnalysisResult, AppError> {
    state
        .current
        .get()
        .ok_or_else(|| AppError::NotFound(missing.to_string()))
}

fn acquire(state: &AppState, kind: ExportKind) -> Result<ExportGuard<'_>, AppError> {
    state.exports.try_acquire(kind).ok_or_else(|| {
        AppError::ExportInProgress(format!("A {} export is already running", kind.label()))
    })
}

/// GET /api/v1/export/share-card
pub async fn handle_share_card(State(state): State<AppState>) -> Result<Response, AppError> {
    let result = current_result(&state, "No results to share!")?;
    let _guard = acquire(&state, ExportKind::ShareCard)?;

    let card = ShareCard::from_result(&result);
    let png = tokio::task::spawn_blocking(move || render_png(&card))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

    let file_name = share_card::file_name(&result);
    info!("Share card exported as {file_name}");
    Ok(attachment("image/png", &file_name, png))
}

/// GET /api/v1/export/cover-letter
pub async fn handle_cover_letter(State(state): State<AppState>) -> Result<Response, AppError> {
    let result = current_result(&state, "No results to download!")?;
    let _guard = acquire(&state, ExportKind::CoverLetter)?;

    let text = cover_letter_text(&result)
        .ok_or_else(|| AppError::Validation(EMPTY_COVER_LETTER.to_string()))?;

    let file_name = cover_letter::file_name(&result);
    info!("Cover letter exported as {file_name}");
    Ok(attachment(
        "text/plain; charset=utf-8",
        &file_name,
        text.as_bytes().to_vec(),
    ))
}

/// GET /api/v1/export/report
pub async fn handle_report(State(state): State<AppState>) -> Result<Response, AppError> {
    let result = current_result(&state, "No results to download!")?;
    let _guard = acquire(&state, ExportKind::Report)?;

    let md = render_report(&result);
    let file_name = report::file_name(&result);
    info!("Report exported as {file_name}");
    Ok(attachment(
        "text/markdown; charset=utf-8",
        &file_name,
        md.into_bytes(),
    ))
}
