// Job postings, saved jobs and applications to a job.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{self, jobs::JobFields};
use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::models::job::JobRow;

pub async fn require_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    db::jobs::get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Loads the job and checks that `company` posted it.
pub async fn require_owned_job(
    pool: &PgPool,
    company: &CompanyRow,
    job_id: Uuid,
) -> Result<JobRow, AppError> {
    let job = require_job(pool, job_id).await?;
    if job.company_id != company.id {
        return Err(AppError::Forbidden(format!(
            "Job {job_id} does not belong to company {}",
            company.id
        )));
    }
    Ok(job)
}

/// Title, description and requirements must be present on every posting.
pub fn validate_job_fields(fields: &JobFields) -> Result<(), AppError> {
    let missing: Vec<&str> = [
        ("title", &fields.title),
        ("description", &fields.description),
        ("requirements", &fields.requirements),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required job fields: {}",
            missing.join(", ")
        )))
    }
}
