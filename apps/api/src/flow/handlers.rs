//! Axum route handlers for the conversational resume API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::flow::controller::{advance, step_at};
use crate::flow::questions::{catalog, Language};
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::storage;
use crate::typst::{compose, ComposedMarkup, TemplateId};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub user_id: Uuid,
    pub template: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub resume_id: Uuid,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct NextRequest {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct NextResponse {
    pub question: String,
    pub is_complete: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    pub resume_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GeneratePdfResponse {
    pub message: String,
    pub resume: ResumeRow,
    pub pdf_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/start
///
/// Creates the conversation and returns the first question.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartResponse>, AppError> {
    let template: TemplateId = request.template.parse()?;
    let language = request
        .language
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();

    let row = db::insert_resume(&state.db, request.user_id, template.as_str(), language.code())
        .await?;
    let first = step_at(&catalog(template, language), 0);

    info!("Started {template} resume {} ({})", row.id, language.code());
    Ok(Json(StartResponse {
        resume_id: row.id,
        question: first.text().to_string(),
    }))
}

/// POST /api/v1/resumes/next
///
/// Records the answer to the pending question and returns the next one.
pub async fn handle_next(
    State(state): State<AppState>,
    Json(request): Json<NextRequest>,
) -> Result<Json<NextResponse>, AppError> {
    let row = db::fetch_owned_resume(&state.db, request.resume_id, request.user_id).await?;
    let template: TemplateId = row.template.parse()?;
    let questions = catalog(template, Language::from_code(&row.language));

    let index = usize::try_from(row.question_index).unwrap_or(0);
    let mut answers = row.answers.0;
    let step = advance(&questions, index, &request.answer, &mut answers);

    let next_index = i32::try_from(step.index())
        .map_err(|_| AppError::Internal(anyhow::anyhow!("question index overflow")))?;
    db::save_progress(&state.db, row.id, &answers, next_index).await?;
    debug!(
        "Resume {} at question {}/{} ({} answers)",
        row.id,
        next_index,
        questions.len(),
        answers.len()
    );

    Ok(Json(NextResponse {
        question: step.text().to_string(),
        is_complete: step.is_complete(),
    }))
}

/// POST /api/v1/resumes/generate-pdf
///
/// Composes the Typst document from the saved answers, compiles it and
/// uploads the PDF.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Json<GeneratePdfResponse>, AppError> {
    let row = db::fetch_owned_resume(&state.db, request.resume_id, request.user_id).await?;

    // Template reads are synchronous file I/O
    let store = state.templates.clone();
    let template = row.template.clone();
    let answers = row.answers.0.clone();
    let source = tokio::task::spawn_blocking(move || {
        compose(&store, &template, &answers).map(ComposedMarkup::into_string)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in compose: {e}")))??;

    let document = state.compiler.compile(&source, &row.id.to_string()).await?;
    info!("Compiled job {} ({} bytes)", document.job_id, document.pdf.len());

    let key = storage::resume_pdf_key(row.id);
    storage::upload_pdf(&state.s3, &state.config.s3_bucket, &key, document.pdf)
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    let resume = db::set_pdf_key(&state.db, row.id, &key).await?;
    let pdf_url = storage::public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);

    info!("Generated PDF for resume {}", resume.id);
    Ok(Json(GeneratePdfResponse {
        message: "Resume generated successfully!".to_string(),
        resume,
        pdf_url,
    }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = db::fetch_owned_resume(&state.db, id, params.user_id).await?;
    Ok(Json(row))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let rows = db::list_resumes_for_user(&state.db, params.user_id).await?;
    Ok(Json(rows))
}
