//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::{
    evaluate, resolve_profile, run, section_details, AtsReport, DocumentUpload, Evaluation,
    EvaluationRequest, SectionDetail,
};
use crate::resume::model::ResumeRecord;
use crate::roles::CategoryListing;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub categories: Vec<CategoryListing>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// Taken as arbitrary JSON so malformed fields degrade instead of rejecting the body.
    #[serde(default)]
    pub record: serde_json::Value,
    pub category: String,
    pub role: String,
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub details: Vec<SectionDetail>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        categories: state.catalog.listing(),
    })
}

/// POST /api/v1/score
///
/// Scores an already-structured record. No document parsing, no model calls.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let profile = resolve_profile(&state.catalog, &request.category, &request.role)?;
    let record = ResumeRecord::from_value(request.record);
    let evaluation = evaluate(&record, profile, &request.raw_text);
    let details = section_details(&evaluation.sections);
    Ok(Json(ScoreResponse {
        evaluation,
        details,
    }))
}

/// POST /api/v1/evaluations
///
/// Multipart form: `file` (PDF or DOCX), `category`, `role`.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AtsReport>, AppError> {
    let report = evaluate_upload(&state, multipart).await?;
    Ok(Json(report))
}

/// POST /api/v1/evaluations/export
///
/// Same form as `/evaluations`; responds with the `{sections, score, feedback}`
/// document as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let report = evaluate_upload(&state, multipart).await?;
    let body = serde_json::to_string_pretty(&report.export())
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ats_report.json\"",
            ),
        ],
        body,
    ))
}

async fn evaluate_upload(state: &AppState, multipart: Multipart) -> Result<AtsReport, AppError> {
    let request = read_form(multipart, state.max_upload_bytes).await?;
    run(
        &state.catalog,
        state.structurer.as_ref(),
        state.feedback.as_ref(),
        request,
    )
    .await
}

async fn read_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<EvaluationRequest, AppError> {
    let mut upload = None;
    let mut category = None;
    let mut role = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if bytes.len() > max_upload_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File exceeds the {max_upload_bytes} byte limit"
                    )));
                }
                upload = Some(DocumentUpload { filename, bytes });
            }
            Some("category") => category = Some(field.text().await?),
            Some("role") => role = Some(field.text().await?),
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    let category = required_text(category, "category")?;
    let role = required_text(role, "role")?;

    Ok(EvaluationRequest {
        upload,
        category,
        role,
    })
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
