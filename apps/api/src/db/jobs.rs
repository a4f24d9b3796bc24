use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::job::{JobListingRow, JobRow};

/// Fields a company supplies when posting or editing a job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
    pub remote_option: bool,
    pub experience_level: String,
    pub education_level: String,
}

/// A company's job with its applicant count, for the company dashboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanyJobRow {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub is_active: bool,
    pub application_count: i64,
    pub created_at: DateTime<Utc>,
}

const LISTING_COLUMNS: &str = r#"
    j.id, j.company_id, c.company_name, c.industry, j.title, j.description,
    j.requirements, j.salary_range, j.location, j.job_type, j.remote_option,
    j.experience_level, j.is_active, j.created_at
"#;

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_job_listing(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Option<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!(
        "SELECT {LISTING_COLUMNS} FROM jobs j JOIN companies c ON j.company_id = c.id WHERE j.id = $1"
    ))
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

/// Active jobs, newest first.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!(
        r#"
        SELECT {LISTING_COLUMNS}
        FROM jobs j JOIN companies c ON j.company_id = c.id
        WHERE j.is_active
        ORDER BY j.created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await
}

/// Active jobs the seeker has not applied to, newest first.
pub async fn recommended_jobs(
    pool: &PgPool,
    seeker_id: Uuid,
    limit: i64,
) -> Result<Vec<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!(
        r#"
        SELECT {LISTING_COLUMNS}
        FROM jobs j JOIN companies c ON j.company_id = c.id
        WHERE j.is_active
          AND j.id NOT IN (SELECT job_id FROM applications WHERE job_seeker_id = $1)
        ORDER BY j.created_at DESC
        LIMIT $2
        "#
    ))
    .bind(seeker_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn create_job(
    pool: &PgPool,
    company_id: Uuid,
    fields: &JobFields,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (company_id, title, description, requirements, salary_range,
             location, job_type, remote_option, experience_level, education_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.requirements)
    .bind(&fields.salary_range)
    .bind(&fields.location)
    .bind(&fields.job_type)
    .bind(fields.remote_option)
    .bind(&fields.experience_level)
    .bind(&fields.education_level)
    .fetch_one(pool)
    .await
}

pub async fn update_job(
    pool: &PgPool,
    job_id: Uuid,
    fields: &JobFields,
    is_active: bool,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            title = $1, description = $2, requirements = $3, salary_range = $4,
            location = $5, job_type = $6, remote_option = $7, experience_level = $8,
            education_level = $9, is_active = $10, updated_at = NOW()
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.requirements)
    .bind(&fields.salary_range)
    .bind(&fields.location)
    .bind(&fields.job_type)
    .bind(fields.remote_option)
    .bind(&fields.experience_level)
    .bind(&fields.education_level)
    .bind(is_active)
    .bind(job_id)
    .fetch_one(pool)
    .await
}

pub async fn list_company_jobs(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<CompanyJobRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyJobRow>(
        r#"
        SELECT j.id, j.title, j.location, j.is_active,
               (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id) AS application_count,
               j.created_at
        FROM jobs j
        WHERE j.company_id = $1
        ORDER BY j.created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
