use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
    pub remote_option: bool,
    pub experience_level: String,
    pub education_level: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    pub fn posting(&self) -> JobPosting {
        JobPosting {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            location: self.location.clone(),
            remote_option: self.remote_option,
            job_type: self.job_type.clone(),
            experience_level: self.experience_level.clone(),
        }
    }
}

/// A job row joined with the posting company, as shown in listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobListingRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub industry: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
    pub remote_option: bool,
    pub experience_level: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The slice of a job posting that scoring reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    /// Scanned for skill keywords and seniority words by the fallback scorer.
    pub requirements: String,
    pub location: String,
    pub remote_option: bool,
    pub job_type: String,
    pub experience_level: String,
}
