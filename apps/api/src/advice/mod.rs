// Career advice: LLM answer when available, canned template otherwise.

pub mod catalog;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod templates;
