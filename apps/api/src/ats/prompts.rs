// LLM prompt templates for the ATS flow.
// System prompts come from llm_client::prompts.

/// ATS scoring prompt. Replace `{resume_text}` before sending.
pub const ATS_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text for its compatibility with an Applicant Tracking System (ATS).

Return a JSON object with this EXACT schema (no extra fields):
{
  "ats_score": 72,
  "score_message": "A solid start. A few changes will help it get past automated filters.",
  "suggestions": [
    {"icon": "key", "title": "Add trade keywords", "subtitle": "List the specific equipment and systems you have worked on."}
  ]
}

Rules:
- ats_score is an integer between 0 and 100.
- score_message is one brief, encouraging sentence.
- suggestions holds exactly 3 specific, actionable improvements.
- icon is a single lowercase word naming a simple icon.

Resume text:
---
{resume_text}
---"#;

/// Resume rewrite prompt. Replace `{language_name}`, `{language_code}`,
/// `{original_text}`, `{suggestions}` and `{user_answers}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below by integrating the user's answers to the improvement suggestions they were given.

The user's preferred language is {language_name} (language code: {language_code}).
All section headings (e.g. "Work Experience", "Skills", "Education") MUST be in {language_name}.
Details the user wrote (company names, job titles, their answers) stay in the language they were written in.

Original resume text:
---
{original_text}
---

Suggestions given to the user:
---
{suggestions}
---

The user's answers to these suggestions:
---
{user_answers}
---

Instructions:
1. Rewrite the entire resume, using the answers to improve the original text.
2. Output the whole rewritten resume as a single Typst document.
3. Start the document with:
#set document(author: "User", title: "Resume")
#set text(font: "Noto Sans", lang: "{language_code}")
4. Use the "Noto Sans" font throughout; it covers English, Hindi and Odia.
5. Translate every section heading to {language_name}."#;
