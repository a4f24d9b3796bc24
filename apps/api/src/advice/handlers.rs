use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::advice::catalog::{find_category, AdviceCategory, CATEGORIES};
use crate::advice::generator::{generate_advice, AdviceOutcome};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::profiles::require_seeker;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct AdviceResponse {
    pub category: String,
    pub question: String,
    #[serde(flatten)]
    pub outcome: AdviceOutcome,
}

/// GET /api/v1/advice/categories
pub async fn handle_list_categories() -> Json<&'static [AdviceCategory]> {
    Json(CATEGORIES)
}

/// GET /api/v1/advice/categories/:id
pub async fn handle_get_category(
    Path(id): Path<String>,
) -> Result<Json<&'static AdviceCategory>, AppError> {
    find_category(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Advice category {id} not found")))
}

/// POST /api/v1/advice
pub async fn handle_ask(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    let category = req.category.trim();
    let question = req.question.trim();
    if category.is_empty() || question.is_empty() {
        return Err(AppError::Validation(
            "Category and question are required".to_string(),
        ));
    }

    let seeker = require_seeker(&state.db, auth.user_id).await?;
    let outcome = generate_advice(&seeker.profile(), category, question, state.llm.as_ref()).await;

    Ok(Json(AdviceResponse {
        category: category.to_string(),
        question: question.to_string(),
        outcome,
    }))
}
