use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::seeker::{Priorities, SeekerRow};

/// Editable seeker profile fields. Skills and résumé text are set by the
/// résumé upload and are not part of this set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeekerProfileFields {
    pub full_name: String,
    pub skills: Option<String>,
    pub experience_years: u32,
    pub education: String,
    pub location: String,
    pub phone: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub bio: String,
    pub preferred_job_types: Vec<String>,
    pub remote_work_preference: bool,
}

pub async fn get_seeker(pool: &PgPool, seeker_id: Uuid) -> Result<Option<SeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerRow>("SELECT * FROM job_seekers WHERE id = $1")
        .bind(seeker_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_seeker_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<SeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerRow>("SELECT * FROM job_seekers WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_seekers(pool: &PgPool) -> Result<Vec<SeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerRow>("SELECT * FROM job_seekers ORDER BY created_at")
        .fetch_all(pool)
        .await
}

/// Overwrites the editable profile fields. `skills: None` keeps the stored skills.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    fields: &SeekerProfileFields,
) -> Result<Option<SeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerRow>(
        r#"
        UPDATE job_seekers SET
            full_name = $1,
            skills = COALESCE($2, skills),
            experience_years = $3,
            education = $4,
            location = $5,
            phone = $6,
            linkedin_url = $7,
            portfolio_url = $8,
            bio = $9,
            preferred_job_types = $10,
            remote_work_preference = $11,
            updated_at = NOW()
        WHERE user_id = $12
        RETURNING *
        "#,
    )
    .bind(&fields.full_name)
    .bind(fields.skills.as_deref())
    .bind(i32::try_from(fields.experience_years).unwrap_or(i32::MAX))
    .bind(&fields.education)
    .bind(&fields.location)
    .bind(&fields.phone)
    .bind(&fields.linkedin_url)
    .bind(&fields.portfolio_url)
    .bind(&fields.bio)
    .bind(&fields.preferred_job_types)
    .bind(fields.remote_work_preference)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Stores a freshly parsed résumé. Empty extracted text or an empty skill
/// list leaves the previous value in place.
pub async fn update_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_text: &str,
    resume_s3_key: &str,
    skills: &[String],
) -> Result<Option<SeekerRow>, sqlx::Error> {
    let resume_text = Some(resume_text).filter(|t| !t.trim().is_empty());
    let skills = Some(skills.join(", ")).filter(|s| !s.is_empty());

    sqlx::query_as::<_, SeekerRow>(
        r#"
        UPDATE job_seekers SET
            resume_text = COALESCE($1, resume_text),
            resume_s3_key = $2,
            skills = COALESCE($3, skills),
            updated_at = NOW()
        WHERE user_id = $4
        RETURNING *
        "#,
    )
    .bind(resume_text)
    .bind(resume_s3_key)
    .bind(skills)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_priorities(
    pool: &PgPool,
    user_id: Uuid,
    priorities: &Priorities,
) -> Result<Option<SeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerRow>(
        "UPDATE job_seekers SET priorities = $1, updated_at = NOW() WHERE user_id = $2 RETURNING *",
    )
    .bind(Json(priorities))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
