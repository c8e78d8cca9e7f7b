use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::answers::AnswerSet;

/// Template label stored on rows created from an uploaded PDF.
pub const UPLOADED_TEMPLATE: &str = "Uploaded";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template: String,
    pub language: String,
    pub answers: Json<AnswerSet>,
    /// Index of the question awaiting an answer.
    pub question_index: i32,
    pub original_text: Option<String>,
    pub ats_score: Option<i32>,
    pub ats_suggestions: Option<Value>,
    pub pdf_key: Option<String>,
    pub edited_pdf_key: Option<String>,
    pub created_at: DateTime<Utc>,
}
