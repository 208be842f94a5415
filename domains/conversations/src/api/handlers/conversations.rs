//! Conversation management API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_auth::AuthUser;
use mimo_common::{Error, Pagination, Result};

use crate::api::middleware::ConversationsState;
use crate::domain::entities::Conversation;
use crate::realtime::{RealtimeEvent, RealtimeEventKind};

/// Request for opening a conversation with a creator
#[derive(Debug, Deserialize)]
pub struct OpenConversationRequest {
    pub creator_id: Uuid,
}

/// Conversation response DTO, shaped for the caller's side
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub creator_id: Uuid,
    pub counterparty_id: Uuid,
    pub unread_count: i32,
    pub unlocked_by_payment_id: Option<Uuid>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationResponse {
    pub fn for_user(conv: Conversation, user_id: Uuid) -> Self {
        let counterparty_id = conv.counterparty(user_id).unwrap_or(conv.creator_id);
        let unread_count = conv.unread_count_for(user_id);
        Self {
            id: conv.id,
            client_id: conv.client_id,
            creator_id: conv.creator_id,
            counterparty_id,
            unread_count,
            unlocked_by_payment_id: conv.unlocked_by_payment_id,
            last_message_at: conv.last_message_at,
            created_at: conv.created_at,
            updated_at: conv.updated_at,
        }
    }
}

/// List the caller's conversations (either side)
pub async fn list_conversations(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let convs = state
        .repos
        .conversations
        .list_by_user(ctx.user.id, pagination.offset(), pagination.limit())
        .await?;

    let responses = convs
        .into_iter()
        .map(|c| ConversationResponse::for_user(c, ctx.user.id))
        .collect();

    Ok(Json(responses))
}

/// Open (or return the existing) conversation with a creator
pub async fn open_conversation(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Json(req): Json<OpenConversationRequest>,
) -> Result<(StatusCode, Json<ConversationResponse>)> {
    let contact = state
        .repos
        .conversations
        .find_creator_contact(req.creator_id)
        .await?
        .ok_or_else(|| Error::NotFound("Creator not found".to_string()))?;

    if contact.suspended_at.is_some() {
        return Err(Error::NotFound("Creator not found".to_string()));
    }
    if contact.user_id == ctx.user.id {
        return Err(Error::Validation(
            "Cannot open a conversation with yourself".to_string(),
        ));
    }

    if let Some(existing) = state
        .repos
        .conversations
        .find_by_pair(ctx.user.id, contact.user_id)
        .await?
    {
        return Ok((
            StatusCode::OK,
            Json(ConversationResponse::for_user(existing, ctx.user.id)),
        ));
    }

    let conversation = Conversation::new(ctx.user.id, contact.user_id)?;
    let created = state.repos.conversations.create(&conversation).await?;

    Ok((
        StatusCode::CREATED,
        Json(ConversationResponse::for_user(created, ctx.user.id)),
    ))
}

/// Get a single conversation by ID (participants only)
pub async fn get_conversation(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>> {
    let conv = state
        .repos
        .conversations
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))?;

    if !conv.is_participant(ctx.user.id) {
        return Err(Error::NotFound("Conversation not found".to_string()));
    }

    Ok(Json(ConversationResponse::for_user(conv, ctx.user.id)))
}

/// Mark the conversation read for the caller
pub async fn mark_read(
    AuthUser(ctx): AuthUser,
    State(state): State<ConversationsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>> {
    let conv = state
        .repos
        .conversations
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))?;

    if !conv.is_participant(ctx.user.id) {
        return Err(Error::NotFound("Conversation not found".to_string()));
    }

    let reader_is_client = ctx.user.id == conv.client_id;
    let updated = state
        .repos
        .conversations
        .mark_read(id, ctx.user.id, reader_is_client)
        .await?
        .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))?;

    // Read receipts are interesting to the counterparty's open chat view
    state.realtime.publish(RealtimeEvent {
        kind: RealtimeEventKind::ConversationUpdated,
        conversation_id: updated.id,
        recipients: vec![updated.client_id, updated.creator_id],
        payload: serde_json::json!({
            "conversation_id": updated.id,
            "read_by": ctx.user.id,
        }),
    });

    Ok(Json(ConversationResponse::for_user(updated, ctx.user.id)))
}
