use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub industry: String,
    pub size: String,
    pub location: String,
    pub website: String,
    pub description: String,
    pub founded_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
