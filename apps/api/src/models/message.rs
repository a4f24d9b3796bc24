use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message joined with the display names of both parties
/// (seeker full name or company name, falling back to username).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender_name: String,
    pub receiver_name: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
