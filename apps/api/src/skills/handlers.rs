use axum::{extract::State, Json};
use serde::Deserialize;

use crate::skills::extractor::{extract_skills, SkillExtraction};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/v1/skills/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<SkillExtraction> {
    Json(extract_skills(&req.text, state.llm.as_ref()).await)
}
