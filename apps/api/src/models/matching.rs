use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One stored match per (seeker, job); recomputation overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub job_seeker_id: Uuid,
    pub job_id: Uuid,
    pub match_score: i32,
    pub ai_reasoning: String,
    pub scorer_backend: String,
    pub created_at: DateTime<Utc>,
}

/// A seeker's match joined with the job it refers to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SeekerMatchRow {
    pub job_id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub salary_range: String,
    pub remote_option: bool,
    pub job_type: String,
    pub match_score: i32,
    pub ai_reasoning: String,
    pub scorer_backend: String,
    pub created_at: DateTime<Utc>,
}
