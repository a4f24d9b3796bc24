use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedJobRow {
    pub job_id: Uuid,
    pub title: String,
    pub location: String,
    pub salary_range: String,
    pub company_name: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedCandidateRow {
    pub job_seeker_id: Uuid,
    pub full_name: String,
    pub skills: String,
    pub experience_years: i32,
    pub saved_at: DateTime<Utc>,
}

/// Saves the job, or un-saves it if already saved. Returns the new state.
pub async fn toggle_saved_job(
    pool: &PgPool,
    seeker_id: Uuid,
    job_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query("DELETE FROM saved_jobs WHERE job_seeker_id = $1 AND job_id = $2")
        .bind(seeker_id)
        .bind(job_id)
        .execute(pool)
        .await?
        .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    sqlx::query("INSERT INTO saved_jobs (job_seeker_id, job_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(seeker_id)
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Saves the candidate, or un-saves them if already saved. Returns the new state.
pub async fn toggle_saved_candidate(
    pool: &PgPool,
    company_id: Uuid,
    seeker_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query(
        "DELETE FROM saved_candidates WHERE company_id = $1 AND job_seeker_id = $2",
    )
    .bind(company_id)
    .bind(seeker_id)
    .execute(pool)
    .await?
    .rows_affected();

    if removed > 0 {
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO saved_candidates (company_id, job_seeker_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(company_id)
    .bind(seeker_id)
    .execute(pool)
    .await?;
    Ok(true)
}

pub async fn list_saved_jobs(
    pool: &PgPool,
    seeker_id: Uuid,
) -> Result<Vec<SavedJobRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedJobRow>(
        r#"
        SELECT j.id AS job_id, j.title, j.location, j.salary_range, c.company_name,
               s.created_at AS saved_at
        FROM saved_jobs s
        JOIN jobs j ON s.job_id = j.id
        JOIN companies c ON j.company_id = c.id
        WHERE s.job_seeker_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(seeker_id)
    .fetch_all(pool)
    .await
}

pub async fn list_saved_candidates(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<SavedCandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedCandidateRow>(
        r#"
        SELECT s.id AS job_seeker_id, s.full_name, s.skills, s.experience_years,
               sc.created_at AS saved_at
        FROM saved_candidates sc
        JOIN job_seekers s ON sc.job_seeker_id = s.id
        WHERE sc.company_id = $1
        ORDER BY sc.created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
