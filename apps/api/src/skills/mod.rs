// Skill extraction: résumé text → flat skill list.
// All LLM calls go through llm_client; the keyword scan covers every failure.

pub mod extractor;
pub mod handlers;
pub mod prompts;
