use anyhow::Result;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answers::AnswerSet;
use crate::models::resume::{ResumeRow, UPLOADED_TEMPLATE};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

/// Inserts a fresh conversational resume positioned at the first question.
pub async fn insert_resume(
    db: &PgPool,
    user_id: Uuid,
    template: &str,
    language: &str,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, template, language, answers, question_index)
        VALUES ($1, $2, $3, $4, $5, 0)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(template)
    .bind(language)
    .bind(Json(AnswerSet::new()))
    .fetch_one(db)
    .await
}

/// Inserts a row for an uploaded PDF that has been scored.
pub async fn insert_uploaded_resume(
    db: &PgPool,
    user_id: Uuid,
    original_text: &str,
    ats_score: i32,
    ats_suggestions: &Value,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO resumes
            (id, user_id, template, language, answers, question_index,
             original_text, ats_score, ats_suggestions)
        VALUES ($1, $2, $3, 'en', $4, 0, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(UPLOADED_TEMPLATE)
    .bind(Json(AnswerSet::new()))
    .bind(original_text)
    .bind(ats_score)
    .bind(ats_suggestions)
    .fetch_one(db)
    .await
}

/// Loads a resume and checks it belongs to `user_id`.
pub async fn fetch_owned_resume(
    db: &PgPool,
    resume_id: Uuid,
    user_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(db)
        .await?;

    let row = row.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    if row.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

pub async fn save_progress(
    db: &PgPool,
    resume_id: Uuid,
    answers: &AnswerSet,
    question_index: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE resumes SET answers = $1, question_index = $2 WHERE id = $3")
        .bind(Json(answers))
        .bind(question_index)
        .bind(resume_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn set_pdf_key(
    db: &PgPool,
    resume_id: Uuid,
    pdf_key: &str,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as("UPDATE resumes SET pdf_key = $1 WHERE id = $2 RETURNING *")
        .bind(pdf_key)
        .bind(resume_id)
        .fetch_one(db)
        .await
}

/// The edited PDF also becomes the primary one.
pub async fn set_edited_pdf_key(
    db: &PgPool,
    resume_id: Uuid,
    pdf_key: &str,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as(
        "UPDATE resumes SET edited_pdf_key = $1, pdf_key = $1 WHERE id = $2 RETURNING *",
    )
    .bind(pdf_key)
    .bind(resume_id)
    .fetch_one(db)
    .await
}

/// All of a user's resumes, newest first.
pub async fn list_resumes_for_user(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(db)
        .await
}
