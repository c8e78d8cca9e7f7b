//! Axum route handlers for the ATS API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::ats::analysis::{analyze, extract_text, Suggestion};
use crate::ats::editor::rewrite;
use crate::db;
use crate::errors::AppError;
use crate::flow::questions::Language;
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::storage;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AtsCheckResponse {
    pub resume_id: Uuid,
    pub ats_score: i32,
    pub score_message: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
pub struct EditedPdfRequest {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    /// Free-form answers keyed by suggestion, passed through to the rewrite.
    pub user_answers: Value,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EditedPdfResponse {
    pub message: String,
    pub resume: ResumeRow,
    pub pdf_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/check
///
/// Multipart form with `user_id` and `file` (a PDF). Scores the resume and
/// stores it so the edit flow can pick it up.
pub async fn handle_check(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable user_id: {e}")))?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file upload: {e}")))?;
                file = Some(bytes);
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;

    let text = extract_text(file).await?;
    let analysis = analyze(&state.llm, &text).await?;

    let suggestions = serde_json::to_value(&analysis.suggestions)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("suggestions are not serializable: {e}")))?;
    let row = db::insert_uploaded_resume(
        &state.db,
        user_id,
        &text,
        analysis.ats_score,
        &suggestions,
    )
    .await?;

    info!("ATS check stored as resume {} (score {})", row.id, analysis.ats_score);
    Ok(Json(AtsCheckResponse {
        resume_id: row.id,
        ats_score: analysis.ats_score,
        score_message: analysis.score_message,
        suggestions: analysis.suggestions,
    }))
}

/// POST /api/v1/ats/generate-edited-pdf
///
/// Rewrites a scored resume with the user's answers, compiles the LLM's
/// Typst output and makes it the resume's primary PDF.
pub async fn handle_generate_edited_pdf(
    State(state): State<AppState>,
    Json(request): Json<EditedPdfRequest>,
) -> Result<Json<EditedPdfResponse>, AppError> {
    let row = db::fetch_owned_resume(&state.db, request.resume_id, request.user_id).await?;
    let original_text = row.original_text.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Resume {} has no uploaded text to edit",
            row.id
        ))
    })?;

    let language = Language::from_code(request.language.as_deref().unwrap_or(&row.language));
    let suggestions = row.ats_suggestions.clone().unwrap_or(Value::Array(Vec::new()));

    let source = rewrite(
        &state.llm,
        original_text,
        &suggestions,
        &request.user_answers,
        language,
    )
    .await?;

    let document = state
        .compiler
        .compile(&source, &format!("{}-edited", row.id))
        .await?;
    info!("Compiled job {} ({} bytes)", document.job_id, document.pdf.len());

    let key = storage::edited_pdf_key(row.id);
    storage::upload_pdf(&state.s3, &state.config.s3_bucket, &key, document.pdf)
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    let resume = db::set_edited_pdf_key(&state.db, row.id, &key).await?;
    let pdf_url = storage::public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);

    info!("Generated edited PDF for resume {} ({})", resume.id, language.code());
    Ok(Json(EditedPdfResponse {
        message: "Resume generated successfully!".to_string(),
        resume,
        pdf_url,
    }))
}
