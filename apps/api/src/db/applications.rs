use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{
    ApplicantRow, ApplicationRow, ApplicationStatus, SeekerApplicationRow,
};

pub async fn find_application(
    pool: &PgPool,
    seeker_id: Uuid,
    job_id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_seeker_id = $1 AND job_id = $2",
    )
    .bind(seeker_id)
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_application(
    pool: &PgPool,
    application_id: Uuid,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
        .bind(application_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_application(
    pool: &PgPool,
    seeker_id: Uuid,
    job_id: Uuid,
    cover_letter: &str,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (job_seeker_id, job_id, cover_letter)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(seeker_id)
    .bind(job_id)
    .bind(cover_letter)
    .fetch_one(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(application_id)
    .fetch_one(pool)
    .await
}

pub async fn list_for_seeker(
    pool: &PgPool,
    seeker_id: Uuid,
) -> Result<Vec<SeekerApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerApplicationRow>(
        r#"
        SELECT a.id, a.job_id, j.title, j.location, c.company_name, a.status, a.created_at
        FROM applications a
        JOIN jobs j ON a.job_id = j.id
        JOIN companies c ON j.company_id = c.id
        WHERE a.job_seeker_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(seeker_id)
    .fetch_all(pool)
    .await
}

const APPLICANT_SELECT: &str = r#"
    SELECT a.id, a.job_id, a.job_seeker_id, s.full_name, s.skills, s.experience_years,
           s.location, a.cover_letter, a.status, m.match_score, a.created_at
    FROM applications a
    JOIN job_seekers s ON a.job_seeker_id = s.id
    JOIN jobs j ON a.job_id = j.id
    LEFT JOIN matches m ON m.job_seeker_id = a.job_seeker_id AND m.job_id = a.job_id
"#;

/// Applicants to one job, best match first.
pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>(&format!(
        "{APPLICANT_SELECT} WHERE a.job_id = $1 ORDER BY m.match_score DESC NULLS LAST, a.created_at DESC"
    ))
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// Most recent applications across all of a company's jobs.
pub async fn recent_for_company(
    pool: &PgPool,
    company_id: Uuid,
    limit: i64,
) -> Result<Vec<ApplicantRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantRow>(&format!(
        "{APPLICANT_SELECT} WHERE j.company_id = $1 ORDER BY a.created_at DESC LIMIT $2"
    ))
    .bind(company_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
