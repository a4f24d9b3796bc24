// Match scoring: seeker × job → 0–100 score with reasoning.
// The LLM scorer falls back to the keyword heuristic on any failure.

pub mod handlers;
pub mod prompts;
pub mod runner;
pub mod scorer;
