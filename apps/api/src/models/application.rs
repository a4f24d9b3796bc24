use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interviewed,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_seeker_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seeker's application joined with the job and company.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SeekerApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    pub location: String,
    pub company_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An application to a company's job joined with the applicant profile and,
/// when one exists, the applicant's match score for that job.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub full_name: String,
    pub skills: String,
    pub experience_years: i32,
    pub location: String,
    pub cover_letter: String,
    pub status: String,
    pub match_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}
