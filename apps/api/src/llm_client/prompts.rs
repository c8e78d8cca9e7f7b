// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds the system prompts that fix the output format.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt that enforces a bare Typst document as output.
pub const TYPST_ONLY_SYSTEM: &str = "You are an expert resume editor who writes Typst. \
    You MUST respond with a single complete, compilable Typst document. \
    Do NOT wrap it in markdown code fences. \
    Do NOT include any commentary before or after the document.";
