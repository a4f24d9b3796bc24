use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::db::companies::CompanyProfileFields;
use crate::db::seekers::SeekerProfileFields;
use crate::auth::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::llm_client::ResultSource;
use crate::models::company::CompanyRow;
use crate::models::seeker::{
    Priorities, PriorityDimension, SeekerRow, MAX_PRIORITY, MIN_PRIORITY,
};
use crate::models::user::UserRow;
use crate::profiles::resume::{extract_text_blocking, store_original, ResumeFormat};
use crate::profiles::{require_company, require_seeker};
use crate::skills::extractor::extract_skills;
use crate::state::AppState;

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    db::users::get_user(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

/// GET /api/v1/seekers/profile
pub async fn handle_get_seeker_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SeekerRow>, AppError> {
    Ok(Json(require_seeker(&state.db, auth.user_id).await?))
}

/// PUT /api/v1/seekers/profile
pub async fn handle_update_seeker_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<SeekerProfileFields>,
) -> Result<Json<SeekerRow>, AppError> {
    if fields.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }

    db::seekers::update_profile(&state.db, auth.user_id, &fields)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Forbidden(format!("User {} is not a job seeker", auth.user_id)))
}

#[derive(Serialize)]
pub struct ResumeUploadResponse {
    pub resume_s3_key: String,
    pub resume_text: String,
    pub skills: Vec<String>,
    pub skills_backend: ResultSource,
    pub profile: SeekerRow,
}

/// POST /api/v1/seekers/resume (multipart: `resume`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let user_id = auth.user_id;
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
            upload = Some((filename, bytes));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    let format = ResumeFormat::from_filename(&filename).ok_or_else(|| {
        AppError::Validation(format!(
            "Unsupported resume format '{filename}': upload a .pdf or .txt file"
        ))
    })?;

    require_seeker(&state.db, user_id).await?;

    let resume_text = extract_text_blocking(format, bytes.clone()).await;

    let resume_s3_key =
        store_original(&state.s3, &state.config.s3_bucket, user_id, format, bytes).await?;

    let extraction = extract_skills(&resume_text, state.llm.as_ref()).await;

    let profile = db::seekers::update_resume(
        &state.db,
        user_id,
        &resume_text,
        &resume_s3_key,
        &extraction.skills,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Seeker profile for user {user_id} not found")))?;

    info!(
        "Resume processed for user {user_id}: {} chars, {} skills ({})",
        resume_text.chars().count(),
        extraction.skills.len(),
        extraction.backend.as_str()
    );

    Ok(Json(ResumeUploadResponse {
        resume_s3_key,
        resume_text,
        skills: extraction.skills,
        skills_backend: extraction.backend,
        profile,
    }))
}

#[derive(Deserialize)]
pub struct PrioritiesUpdate {
    #[serde(default)]
    pub priorities: BTreeMap<PriorityDimension, i64>,
}

/// Validates submitted priorities. Every dimension ends up explicitly set;
/// one left out of the request is stored as the default.
pub fn priorities_from_request(
    submitted: &BTreeMap<PriorityDimension, i64>,
) -> Result<Priorities, AppError> {
    let mut priorities = Priorities::default();

    for dimension in PriorityDimension::ALL {
        let value = submitted
            .get(&dimension)
            .copied()
            .unwrap_or_else(|| i64::from(priorities.get(dimension)));
        let value = u8::try_from(value)
            .ok()
            .filter(|v| (MIN_PRIORITY..=MAX_PRIORITY).contains(v))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Priority '{}' must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {value}",
                    dimension.key()
                ))
            })?;
        priorities.set(dimension, value);
    }

    Ok(priorities)
}

/// PUT /api/v1/seekers/priorities
pub async fn handle_update_priorities(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PrioritiesUpdate>,
) -> Result<Json<SeekerRow>, AppError> {
    let priorities = priorities_from_request(&req.priorities)?;

    db::seekers::update_priorities(&state.db, auth.user_id, &priorities)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Forbidden(format!("User {} is not a job seeker", auth.user_id)))
}

/// GET /api/v1/companies/profile
pub async fn handle_get_company_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CompanyRow>, AppError> {
    Ok(Json(require_company(&state.db, auth.user_id).await?))
}

/// PUT /api/v1/companies/profile
pub async fn handle_update_company_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<CompanyProfileFields>,
) -> Result<Json<CompanyRow>, AppError> {
    if fields.company_name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    db::companies::update_company(&state.db, auth.user_id, &fields)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Forbidden(format!("User {} is not a company", auth.user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_priorities_default_to_three() {
        let mut submitted = BTreeMap::new();
        submitted.insert(PriorityDimension::Salary, 5);

        let priorities = priorities_from_request(&submitted).unwrap();
        assert_eq!(priorities.get(PriorityDimension::Salary), 5);
        assert_eq!(priorities.get(PriorityDimension::Benefits), 3);
        assert_eq!(priorities.iter().count(), PriorityDimension::ALL.len());
    }

    #[test]
    fn test_out_of_range_priority_rejected() {
        for bad in [0, 6, -1, 300] {
            let mut submitted = BTreeMap::new();
            submitted.insert(PriorityDimension::RemoteWork, bad);
            let err = priorities_from_request(&submitted).unwrap_err();
            assert!(matches!(err, AppError::Validation(msg) if msg.contains("remote_work")));
        }
    }

    #[test]
    fn test_priorities_request_parses_dimension_keys() {
        let req: PrioritiesUpdate = serde_json::from_str(
            r#"{"priorities":{"work_life_balance":4,"career_growth":2}}"#,
        )
        .unwrap();
        let priorities = priorities_from_request(&req.priorities).unwrap();
        assert_eq!(priorities.get(PriorityDimension::WorkLifeBalance), 4);
        assert_eq!(priorities.get(PriorityDimension::CareerGrowth), 2);
    }

    #[test]
    fn test_seeker_profile_body_ignores_user_id() {
        let fields: SeekerProfileFields = serde_json::from_str(
            r#"{"user_id":"7f0c8a4e-1d2b-4c3d-9e8f-0a1b2c3d4e5f",
                "full_name":"Ada Lovelace","experience_years":6}"#,
        )
        .unwrap();
        assert_eq!(fields.full_name, "Ada Lovelace");
        assert_eq!(fields.experience_years, 6);
        assert!(fields.skills.is_none());
    }

    #[test]
    fn test_empty_priorities_request_stores_defaults() {
        let priorities = priorities_from_request(&BTreeMap::new()).unwrap();
        assert!(!priorities.is_empty());
        for (_, value) in priorities.iter() {
            assert_eq!(value, crate::models::seeker::DEFAULT_PRIORITY);
        }
    }
}
