//! ATS scoring of an uploaded resume.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::prompts::ATS_ANALYSIS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// Model reply as received. Field names are accepted in either case style.
#[derive(Debug, Deserialize)]
pub struct RawAnalysis {
    #[serde(alias = "atsScore")]
    ats_score: f64,
    #[serde(default, alias = "scoreMessage")]
    score_message: String,
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsAnalysis {
    /// Always within 0..=100.
    pub ats_score: i32,
    pub score_message: String,
    pub suggestions: Vec<Suggestion>,
}

impl From<RawAnalysis> for AtsAnalysis {
    fn from(raw: RawAnalysis) -> Self {
        let score = if raw.ats_score.is_finite() {
            raw.ats_score.round().clamp(0.0, 100.0) as i32
        } else {
            0
        };
        if f64::from(score) != raw.ats_score {
            warn!("ATS score {} adjusted to {score}", raw.ats_score);
        }
        Self {
            ats_score: score,
            score_message: raw.score_message,
            suggestions: raw.suggestions,
        }
    }
}

/// Pulls plain text out of PDF bytes. Parsing is CPU-bound, so it runs off
/// the async executor.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pdf extract: {e}")))?
        .map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::UnprocessableEntity("Could not read text from the uploaded PDF".to_string())
        })?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

pub async fn analyze(llm: &LlmClient, resume_text: &str) -> Result<AtsAnalysis, AppError> {
    let prompt = ATS_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let analysis: AtsAnalysis = llm
        .call_json::<RawAnalysis>(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("ATS analysis failed: {e}")))?
        .into();

    info!(
        "ATS analysis scored {} with {} suggestions",
        analysis.ats_score,
        analysis.suggestions.len()
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{parse_json_reply, LlmError};

    fn parse_analysis(reply: &str) -> Result<AtsAnalysis, LlmError> {
        parse_json_reply::<RawAnalysis>(reply).map(AtsAnalysis::from)
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"ats_score\": 68, \"score_message\": \"Good base\", \"suggestions\": [{\"icon\": \"key\", \"title\": \"Keywords\", \"subtitle\": \"Add tools\"}]}\n```";
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.ats_score, 68);
        assert_eq!(analysis.score_message, "Good base");
        assert_eq!(analysis.suggestions[0].title, "Keywords");
    }

    #[test]
    fn test_parse_camel_case_with_chatter() {
        let reply = "Sure! {\"atsScore\": 91.6, \"scoreMessage\": \"Great\", \"suggestions\": []} Let me know.";
        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.ats_score, 92);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(parse_analysis("{\"ats_score\": 140}").unwrap().ats_score, 100);
        assert_eq!(parse_analysis("{\"ats_score\": -5}").unwrap().ats_score, 0);
    }

    #[test]
    fn test_missing_score_is_parse_error() {
        let err = parse_analysis("{\"score_message\": \"hi\"}").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_extract_text_rejects_non_pdf() {
        let err = extract_text(Bytes::from_static(b"not a pdf")).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
