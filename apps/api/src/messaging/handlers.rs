use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::errors::AppError;
use crate::messaging::{group_conversations, Conversation};
use crate::models::message::MessageRow;
use crate::state::AppState;

/// GET /api/v1/messages
///
/// Unread counts reflect the state before this call; incoming messages are
/// marked read afterwards.
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Conversation>>, AppError> {
    let messages = db::messages::list_for_user(&state.db, auth.user_id).await?;
    let conversations = group_conversations(auth.user_id, &messages);

    let marked = db::messages::mark_read(&state.db, auth.user_id, None).await?;
    debug!("Marked {marked} messages read for user {}", auth.user_id);

    Ok(Json(conversations))
}

/// GET /api/v1/messages/:other_user_id
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(other_user_id): Path<Uuid>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    db::users::get_user(&state.db, other_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {other_user_id} not found")))?;

    let messages = db::messages::conversation(&state.db, auth.user_id, other_user_id).await?;
    db::messages::mark_read(&state.db, auth.user_id, Some(other_user_id)).await?;

    Ok(Json(messages))
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Uuid,
    #[serde(default)]
    pub content: String,
}

/// POST /api/v1/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageRow>), AppError> {
    let sender_id = auth.user_id;
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message content is required".to_string()));
    }
    if sender_id == req.receiver_id {
        return Err(AppError::Validation(
            "Cannot send a message to yourself".to_string(),
        ));
    }

    for user_id in [sender_id, req.receiver_id] {
        db::users::get_user(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    }

    let id = db::messages::insert_message(&state.db, sender_id, req.receiver_id, content).await?;
    let message = db::messages::get_message(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Message {id} missing after insert")))?;

    Ok((StatusCode::CREATED, Json(message)))
}
