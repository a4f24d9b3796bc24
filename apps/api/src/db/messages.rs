use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::MessageRow;

/// Display name: seeker full name, else company name, else username.
const MESSAGE_SELECT: &str = r#"
    SELECT m.id, m.sender_id, m.receiver_id,
           COALESCE(NULLIF(ss.full_name, ''), NULLIF(sc.company_name, ''), su.username) AS sender_name,
           COALESCE(NULLIF(rs.full_name, ''), NULLIF(rc.company_name, ''), ru.username) AS receiver_name,
           m.content, m.is_read, m.created_at
    FROM messages m
    JOIN users su ON m.sender_id = su.id
    JOIN users ru ON m.receiver_id = ru.id
    LEFT JOIN job_seekers ss ON ss.user_id = su.id
    LEFT JOIN companies sc ON sc.user_id = su.id
    LEFT JOIN job_seekers rs ON rs.user_id = ru.id
    LEFT JOIN companies rc ON rc.user_id = ru.id
"#;

pub async fn insert_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO messages (sender_id, receiver_id, content) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn get_message(pool: &PgPool, message_id: Uuid) -> Result<Option<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(&format!("{MESSAGE_SELECT} WHERE m.id = $1"))
        .bind(message_id)
        .fetch_optional(pool)
        .await
}

/// Every message the user sent or received, newest first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(&format!(
        "{MESSAGE_SELECT} WHERE m.sender_id = $1 OR m.receiver_id = $1 ORDER BY m.created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Messages between two users, oldest first.
pub async fn conversation(
    pool: &PgPool,
    user_id: Uuid,
    other_user_id: Uuid,
) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(&format!(
        r#"{MESSAGE_SELECT}
        WHERE (m.sender_id = $1 AND m.receiver_id = $2)
           OR (m.sender_id = $2 AND m.receiver_id = $1)
        ORDER BY m.created_at ASC"#
    ))
    .bind(user_id)
    .bind(other_user_id)
    .fetch_all(pool)
    .await
}

/// Marks messages addressed to `user_id` as read, optionally only those from one sender.
pub async fn mark_read(
    pool: &PgPool,
    user_id: Uuid,
    from_user_id: Option<Uuid>,
) -> Result<u64, sqlx::Error> {
    Ok(sqlx::query(
        r#"
        UPDATE messages SET is_read = TRUE
        WHERE receiver_id = $1 AND NOT is_read
          AND ($2::uuid IS NULL OR sender_id = $2)
        "#,
    )
    .bind(user_id)
    .bind(from_user_id)
    .execute(pool)
    .await?
    .rows_affected())
}
