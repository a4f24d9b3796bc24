use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Declined,
    Withdrawn,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Declined => "declined",
            OfferStatus::Withdrawn => "withdrawn",
        }
    }
}

/// A seeker's answer to a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferResponse {
    Accepted,
    Declined,
}

impl From<OfferResponse> for OfferStatus {
    fn from(response: OfferResponse) -> Self {
        match response {
            OfferResponse::Accepted => OfferStatus::Accepted,
            OfferResponse::Declined => OfferStatus::Declined,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Uuid,
    pub offer_message: String,
    pub salary_offered: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An offer joined with the job title and the counterpart's display name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OfferSummaryRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    pub counterpart_name: String,
    pub salary_offered: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
