//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::orchestrator::{analyze, AnalysisRequest, AnalysisResult};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

const ANALYSIS_COMPLETE_MESSAGE: &str =
    "Full dynamic skill analysis and roadmap generated successfully.";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Oversized and non-JSON bodies keep axum's status; anything else is caller input.
fn body_rejection(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(message),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::UnsupportedMediaType(message),
        _ => AppError::InvalidRequest(message),
    }
}

/// POST /api/skills/analyze
///
/// Extracts the caller's skills from text or a document, resolves what the target role
/// requires, and returns the gap with a learning roadmap.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(body_rejection)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id, user_id = %user.id);

    let result = analyze(request, &user.id, state.extractor.as_ref(), state.llm.as_ref())
        .instrument(span)
        .await?;

    Ok(Json(AnalyzeResponse {
        message: ANALYSIS_COMPLETE_MESSAGE,
        result,
    }))
}
