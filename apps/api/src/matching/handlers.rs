use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::models::matching::SeekerMatchRow;
use crate::profiles::require_seeker;
use crate::state::AppState;

const DEFAULT_MATCH_LIMIT: i64 = 20;
const MAX_MATCH_LIMIT: i64 = 100;

#[derive(Deserialize)]
pub struct MatchesQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/seekers/matches
pub async fn handle_seeker_matches(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MatchesQuery>,
) -> Result<Json<Vec<SeekerMatchRow>>, AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_MATCH_LIMIT)
        .clamp(1, MAX_MATCH_LIMIT);

    Ok(Json(
        db::matches::list_for_seeker(&state.db, seeker.id, limit).await?,
    ))
}
