//! Message API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::AuthUser;
use mimo_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::ConversationsState;
use crate::domain::entities::ChatMessage;
use crate::realtime::{RealtimeEvent, RealtimeEventKind};
use crate::repository::transactions::record_message;

/// Request for sending a message
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Message content
    pub content: String,
}

/// Message response DTO
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageResponse {
    fn from(m: ChatMessage) -> Self {
        Self {
            id: m.id,
            conversation_id: m.conversation_id,
            sender_id: m.sender_id,
            content: m.content,
            read_at: m.read_at,
            created_at: m.created_at,
        }
    }
}

/// Send a message to a conversation
pub async fn send_message(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Path(conversation_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let conv = state
        .repos
        .conversations
        .find(conversation_id)
        .await?
        .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))?;

    if !conv.is_participant(ctx.user.id) {
        return Err(Error::NotFound("Conversation not found".to_string()));
    }

    let message = ChatMessage::new(conversation_id, ctx.user.id, req.content)?;

    let sender_name = ctx
        .user
        .display_name
        .clone()
        .unwrap_or_else(|| ctx.user.email.clone());

    let (created, updated_conv) =
        record_message(state.repos.pool(), &message, &conv, &sender_name).await?;

    let response = MessageResponse::from(created);

    state.realtime.publish(RealtimeEvent {
        kind: RealtimeEventKind::MessageCreated,
        conversation_id,
        recipients: vec![updated_conv.client_id, updated_conv.creator_id],
        payload: serde_json::to_value(&response)?,
    });

    Ok((StatusCode::CREATED, Json(response)))
}

/// List messages for a conversation, oldest first
pub async fn list_messages(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Path(conversation_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<MessageResponse>>> {
    let conv = state
        .repos
        .conversations
        .find(conversation_id)
        .await?
        .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))?;

    if !conv.is_participant(ctx.user.id) {
        return Err(Error::NotFound("Conversation not found".to_string()));
    }

    let messages = state
        .repos
        .messages
        .list_by_conversation(conversation_id, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
