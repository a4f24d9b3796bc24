use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::applications::{changed_concurrently, ensure_pending};
use crate::auth::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::jobs::require_owned_job;
use crate::models::application::{ApplicationRow, ApplicationStatus, SeekerApplicationRow};
use crate::models::offer::{OfferResponse, OfferRow, OfferStatus};
use crate::profiles::{require_company, require_seeker};
use crate::state::AppState;

/// GET /api/v1/applications
pub async fn handle_list_my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<SeekerApplicationRow>>, AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    Ok(Json(
        db::applications::list_for_seeker(&state.db, seeker.id).await?,
    ))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// PUT /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    let application = db::applications::get_application(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    require_owned_job(&state.db, &company, application.job_id).await?;

    let updated = db::applications::update_status(&state.db, id, req.status).await?;
    info!("Application {id} moved to {}", req.status.as_str());
    Ok(Json(updated))
}

/// POST /api/v1/candidates/:seeker_id/save
pub async fn handle_toggle_saved_candidate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(seeker_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    db::seekers::get_seeker(&state.db, seeker_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job seeker {seeker_id} not found")))?;

    let saved = db::saved::toggle_saved_candidate(&state.db, company.id, seeker_id).await?;
    Ok(Json(json!({ "job_seeker_id": seeker_id, "saved": saved })))
}

#[derive(Deserialize)]
pub struct MakeOfferRequest {
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    #[serde(default)]
    pub offer_message: String,
    #[serde(default)]
    pub salary_offered: String,
}

/// POST /api/v1/offers
///
/// A pending offer for the same pair is rejected; an answered or withdrawn
/// one is re-opened with the new terms.
pub async fn handle_make_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MakeOfferRequest>,
) -> Result<(StatusCode, Json<OfferRow>), AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    require_owned_job(&state.db, &company, req.job_id).await?;
    db::seekers::get_seeker(&state.db, req.job_seeker_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job seeker {} not found", req.job_seeker_id)))?;

    let offer = db::offers::upsert_pending_offer(
        &state.db,
        req.job_id,
        req.job_seeker_id,
        req.offer_message.trim(),
        req.salary_offered.trim(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Conflict("A pending offer already exists for this candidate".to_string())
    })?;

    info!(
        "Company {} made offer {} for job {}",
        company.id, offer.id, req.job_id
    );
    Ok((StatusCode::CREATED, Json(offer)))
}

async fn load_offer(state: &AppState, id: Uuid) -> Result<OfferRow, AppError> {
    db::offers::get_offer(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer {id} not found")))
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub response: OfferResponse,
}

/// POST /api/v1/offers/:id/respond
pub async fn handle_respond_to_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<OfferRow>, AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    let offer = load_offer(&state, id).await?;
    if offer.job_seeker_id != seeker.id {
        return Err(AppError::Forbidden(format!(
            "Offer {id} was not made to this job seeker"
        )));
    }
    ensure_pending(&offer)?;

    let status = OfferStatus::from(req.response);
    let updated =
        changed_concurrently(db::offers::resolve_offer(&state.db, &offer, status).await?, id)?;
    info!("Seeker {} {} offer {id}", seeker.id, status.as_str());
    Ok(Json(updated))
}

/// POST /api/v1/offers/:id/withdraw
pub async fn handle_withdraw_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferRow>, AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    let offer = load_offer(&state, id).await?;
    require_owned_job(&state.db, &company, offer.job_id).await?;
    ensure_pending(&offer)?;

    let withdrawn = db::offers::resolve_offer(&state.db, &offer, OfferStatus::Withdrawn).await?;
    let updated = changed_concurrently(withdrawn, id)?;
    info!("Company {} withdrew offer {id}", company.id);
    Ok(Json(updated))
}
