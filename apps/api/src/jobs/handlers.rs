use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::jobs::JobFields;
use crate::db::{self, is_unique_violation};
use crate::errors::AppError;
use crate::jobs::{require_job, require_owned_job, validate_job_fields};
use crate::matching::runner::spawn_matching;
use crate::models::application::{ApplicantRow, ApplicationRow};
use crate::models::job::{JobListingRow, JobRow};
use crate::models::matching::MatchRow;
use crate::models::user::UserType;
use crate::profiles::{require_company, require_seeker};
use crate::state::AppState;

fn start_matching(state: &AppState, job_id: Uuid) {
    spawn_matching(
        Arc::new(state.db.clone()),
        Arc::clone(&state.match_scorer),
        job_id,
    );
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobListingRow>>, AppError> {
    Ok(Json(db::jobs::list_active_jobs(&state.db).await?))
}

/// POST /api/v1/jobs
///
/// Matching against every seeker starts in the background; the response does
/// not wait for it.
pub async fn handle_post_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<JobFields>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    validate_job_fields(&fields)?;
    let company = require_company(&state.db, auth.user_id).await?;

    let job = db::jobs::create_job(&state.db, company.id, &fields).await?;
    info!("Company {} posted job {}", company.id, job.id);

    start_matching(&state, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

#[derive(Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobListingRow,
    pub has_applied: bool,
    #[serde(rename = "match")]
    pub match_result: Option<MatchRow>,
}

/// GET /api/v1/jobs/:id
///
/// Anonymous callers get the listing only; a signed-in seeker also sees
/// their application state and match.
pub async fn handle_get_job(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = db::jobs::get_job_listing(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let seeker = match auth {
        Some(AuthUser {
            user_id,
            user_type: UserType::Seeker,
        }) => db::seekers::get_seeker_by_user(&state.db, user_id).await?,
        _ => None,
    };

    let (has_applied, match_result) = match seeker {
        Some(seeker) => (
            db::applications::find_application(&state.db, seeker.id, id)
                .await?
                .is_some(),
            db::matches::get_match(&state.db, seeker.id, id).await?,
        ),
        None => (false, None),
    };

    Ok(Json(JobDetailResponse {
        job,
        has_applied,
        match_result,
    }))
}

#[derive(Deserialize)]
pub struct EditJobRequest {
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub fields: JobFields,
}

/// PUT /api/v1/jobs/:id
pub async fn handle_edit_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<EditJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    validate_job_fields(&req.fields)?;
    let company = require_company(&state.db, auth.user_id).await?;
    let existing = require_owned_job(&state.db, &company, id).await?;

    let is_active = req.is_active.unwrap_or(existing.is_active);
    let job = db::jobs::update_job(&state.db, id, &req.fields, is_active).await?;
    info!("Company {} updated job {id} (active={is_active})", company.id);

    if job.is_active {
        start_matching(&state, job.id);
    }
    Ok(Json(job))
}

/// POST /api/v1/jobs/:id/matching
pub async fn handle_run_matching(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    let job = require_owned_job(&state.db, &company, id).await?;
    if !job.is_active {
        return Err(AppError::Validation(format!(
            "Job {id} is not active; activate it before running matching"
        )));
    }

    start_matching(&state, job.id);
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "job_id": job.id, "status": "started" })),
    ))
}

/// POST /api/v1/jobs/:id/save
pub async fn handle_toggle_saved_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    require_job(&state.db, id).await?;

    let saved = db::saved::toggle_saved_job(&state.db, seeker.id, id).await?;
    Ok(Json(json!({ "job_id": id, "saved": saved })))
}

#[derive(Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub cover_letter: String,
}

/// POST /api/v1/jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    let job = require_job(&state.db, id).await?;
    if !job.is_active {
        return Err(AppError::Validation(format!(
            "Job {id} is no longer accepting applications"
        )));
    }

    if db::applications::find_application(&state.db, seeker.id, id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "You have already applied to job {id}"
        )));
    }

    let application =
        db::applications::create_application(&state.db, seeker.id, id, req.cover_letter.trim())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("You have already applied to job {id}"))
                } else {
                    AppError::Database(e)
                }
            })?;

    info!("Seeker {} applied to job {id}", seeker.id);
    Ok((StatusCode::CREATED, Json(application)))
}

#[derive(Serialize)]
pub struct ApplicationCheckResponse {
    pub has_applied: bool,
    pub application: Option<ApplicationRow>,
}

/// GET /api/v1/jobs/:id/application
pub async fn handle_check_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationCheckResponse>, AppError> {
    let seeker = require_seeker(&state.db, auth.user_id).await?;
    let application = db::applications::find_application(&state.db, seeker.id, id).await?;

    Ok(Json(ApplicationCheckResponse {
        has_applied: application.is_some(),
        application,
    }))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    let company = require_company(&state.db, auth.user_id).await?;
    require_owned_job(&state.db, &company, id).await?;

    Ok(Json(db::applications::list_for_job(&state.db, id).await?))
}
