use sqlx::PgPool;
use uuid::Uuid;

use crate::matching::scorer::MatchOutcome;
use crate::models::matching::{MatchRow, SeekerMatchRow};

/// Writes the match for (seeker, job), replacing any earlier result.
pub async fn upsert_match(
    pool: &PgPool,
    seeker_id: Uuid,
    job_id: Uuid,
    outcome: &MatchOutcome,
) -> Result<MatchRow, sqlx::Error> {
    sqlx::query_as::<_, MatchRow>(
        r#"
        INSERT INTO matches (job_seeker_id, job_id, match_score, ai_reasoning, scorer_backend)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (job_seeker_id, job_id) DO UPDATE SET
            match_score = EXCLUDED.match_score,
            ai_reasoning = EXCLUDED.ai_reasoning,
            scorer_backend = EXCLUDED.scorer_backend,
            created_at = NOW()
        RETURNING *
        "#,
    )
    .bind(seeker_id)
    .bind(job_id)
    .bind(i32::from(outcome.score))
    .bind(&outcome.reasoning)
    .bind(outcome.backend.as_str())
    .fetch_one(pool)
    .await
}

pub async fn get_match(
    pool: &PgPool,
    seeker_id: Uuid,
    job_id: Uuid,
) -> Result<Option<MatchRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchRow>(
        "SELECT * FROM matches WHERE job_seeker_id = $1 AND job_id = $2",
    )
    .bind(seeker_id)
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

/// A seeker's matches on active jobs, best first.
pub async fn list_for_seeker(
    pool: &PgPool,
    seeker_id: Uuid,
    limit: i64,
) -> Result<Vec<SeekerMatchRow>, sqlx::Error> {
    sqlx::query_as::<_, SeekerMatchRow>(
        r#"
        SELECT m.job_id, j.title, c.company_name, j.location, j.salary_range,
               j.remote_option, j.job_type, m.match_score, m.ai_reasoning,
               m.scorer_backend, m.created_at
        FROM matches m
        JOIN jobs j ON m.job_id = j.id
        JOIN companies c ON j.company_id = c.id
        WHERE m.job_seeker_id = $1 AND j.is_active
        ORDER BY m.match_score DESC, m.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(seeker_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
