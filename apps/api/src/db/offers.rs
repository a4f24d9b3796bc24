use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::ApplicationStatus;
use crate::models::offer::{OfferRow, OfferStatus, OfferSummaryRow};

pub async fn get_offer(pool: &PgPool, offer_id: Uuid) -> Result<Option<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>("SELECT * FROM job_offers WHERE id = $1")
        .bind(offer_id)
        .fetch_optional(pool)
        .await
}

/// Re-opening happens only when the existing row is no longer pending, so a
/// concurrent duplicate offer updates nothing.
const UPSERT_OFFER_SQL: &str = r#"
    INSERT INTO job_offers (job_id, job_seeker_id, offer_message, salary_offered)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (job_id, job_seeker_id) DO UPDATE SET
        offer_message = EXCLUDED.offer_message,
        salary_offered = EXCLUDED.salary_offered,
        status = 'pending',
        updated_at = NOW()
    WHERE job_offers.status <> 'pending'
    RETURNING *
"#;

const RESOLVE_OFFER_SQL: &str = r#"
    UPDATE job_offers SET status = $1, updated_at = NOW()
    WHERE id = $2 AND status = 'pending'
    RETURNING *
"#;

/// Creates the offer, or re-opens an earlier non-pending one with new terms.
/// Returns `None` when a pending offer already exists for the pair.
pub async fn upsert_pending_offer(
    pool: &PgPool,
    job_id: Uuid,
    seeker_id: Uuid,
    offer_message: &str,
    salary_offered: &str,
) -> Result<Option<OfferRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferRow>(UPSERT_OFFER_SQL)
        .bind(job_id)
        .bind(seeker_id)
        .bind(offer_message)
        .bind(salary_offered)
        .fetch_optional(pool)
        .await
}

/// Moves a pending offer to `status`. Accepting also marks the seeker's
/// application for that job as accepted, in the same transaction.
///
/// Returns `None` (and changes nothing) if the offer stopped being pending
/// after the caller loaded it.
pub async fn resolve_offer(
    pool: &PgPool,
    offer: &OfferRow,
    status: OfferStatus,
) -> Result<Option<OfferRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(updated) = sqlx::query_as::<_, OfferRow>(RESOLVE_OFFER_SQL)
        .bind(status.as_str())
        .bind(offer.id)
        .fetch_optional(&mut *tx)
        .await?
    else {
        tx.rollback().await?;
        return Ok(None);
    };

    if status == OfferStatus::Accepted {
        sqlx::query(
            r#"
            UPDATE applications SET status = $1, updated_at = NOW()
            WHERE job_seeker_id = $2 AND job_id = $3
            "#,
        )
        .bind(ApplicationStatus::Accepted.as_str())
        .bind(offer.job_seeker_id)
        .bind(offer.job_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(Some(updated))
}

/// Offers received by a seeker; the counterpart is the company.
pub async fn list_for_seeker(
    pool: &PgPool,
    seeker_id: Uuid,
) -> Result<Vec<OfferSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferSummaryRow>(
        r#"
        SELECT o.id, o.job_id, j.title, c.company_name AS counterpart_name,
               o.salary_offered, o.status, o.created_at
        FROM job_offers o
        JOIN jobs j ON o.job_id = j.id
        JOIN companies c ON j.company_id = c.id
        WHERE o.job_seeker_id = $1
        ORDER BY o.created_at DESC
        "#,
    )
    .bind(seeker_id)
    .fetch_all(pool)
    .await
}

/// Offers made by a company; the counterpart is the seeker.
pub async fn list_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<OfferSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, OfferSummaryRow>(
        r#"
        SELECT o.id, o.job_id, j.title, s.full_name AS counterpart_name,
               o.salary_offered, o.status, o.created_at
        FROM job_offers o
        JOIN jobs j ON o.job_id = j.id
        JOIN job_seekers s ON o.job_seeker_id = s.id
        WHERE j.company_id = $1
        ORDER BY o.created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}
