//! LLM rewrite of an uploaded resume into a standalone Typst document.

use serde_json::Value;

use crate::ats::prompts::REWRITE_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::flow::questions::Language;
use crate::llm_client::prompts::TYPST_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

pub fn build_rewrite_prompt(
    original_text: &str,
    suggestions: &Value,
    user_answers: &Value,
    language: Language,
) -> String {
    let pretty = |v: &Value| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
    let suggestions = pretty(suggestions);
    let user_answers = pretty(user_answers);

    fill_placeholders(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("language_name", language.name()),
            ("language_code", language.code()),
            ("original_text", original_text),
            ("suggestions", suggestions.as_str()),
            ("user_answers", user_answers.as_str()),
        ],
    )
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
/// Inserted values are never scanned again, so user text that happens to
/// contain a placeholder stays literal.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns Typst source ready for the compiler.
pub async fn rewrite(
    llm: &LlmClient,
    original_text: &str,
    suggestions: &Value,
    user_answers: &Value,
    language: Language,
) -> Result<String, AppError> {
    let prompt = build_rewrite_prompt(original_text, suggestions, user_answers, language);
    llm.call_text(&prompt, TYPST_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume rewrite failed: {e}")))
}
