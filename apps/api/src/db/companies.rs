use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::CompanyRow;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyProfileFields {
    pub company_name: String,
    pub industry: String,
    pub size: String,
    pub location: String,
    pub website: String,
    pub description: String,
    pub founded_year: Option<i32>,
}

pub async fn get_company_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_company(
    pool: &PgPool,
    user_id: Uuid,
    fields: &CompanyProfileFields,
) -> Result<Option<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies SET
            company_name = $1,
            industry = $2,
            size = $3,
            location = $4,
            website = $5,
            description = $6,
            founded_year = $7,
            updated_at = NOW()
        WHERE user_id = $8
        RETURNING *
        "#,
    )
    .bind(&fields.company_name)
    .bind(&fields.industry)
    .bind(&fields.size)
    .bind(&fields.location)
    .bind(&fields.website)
    .bind(&fields.description)
    .bind(fields.founded_year)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
