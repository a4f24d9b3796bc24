// Accounts and the two profile kinds: seekers and companies.

pub mod handlers;
pub mod resume;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::models::seeker::SeekerRow;

/// The seeker profile owned by `user_id`, or 403 if the user is not a seeker.
pub async fn require_seeker(pool: &PgPool, user_id: Uuid) -> Result<SeekerRow, AppError> {
    db::seekers::get_seeker_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden(format!("User {user_id} is not a job seeker")))
}

/// The company profile owned by `user_id`, or 403 if the user is not a company.
pub async fn require_company(pool: &PgPool, user_id: Uuid) -> Result<CompanyRow, AppError> {
    db::companies::get_company_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden(format!("User {user_id} is not a company")))
}
