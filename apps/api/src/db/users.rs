use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{UserRow, UserType};

/// Inserts a user and the empty profile row for its side of the marketplace
/// in one transaction.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    user_type: UserType,
) -> Result<UserRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, email, password_hash, user_type)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(user_type.as_str())
    .fetch_one(&mut *tx)
    .await?;

    match user_type {
        UserType::Seeker => {
            sqlx::query("INSERT INTO job_seekers (user_id) VALUES ($1)")
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }
        UserType::Company => {
            // Company name starts as the username until the profile is filled in.
            sqlx::query("INSERT INTO companies (user_id, company_name) VALUES ($1, $2)")
                .bind(user.id)
                .bind(username)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(user)
}

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Emails are matched case-insensitively.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}
