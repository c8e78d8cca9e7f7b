// ATS flow: score an uploaded PDF, then rewrite it from the user's answers
// to the improvement suggestions. All LLM calls go through llm_client.

pub mod analysis;
pub mod editor;
pub mod handlers;
pub mod prompts;
