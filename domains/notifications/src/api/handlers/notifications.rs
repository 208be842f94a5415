//! Notification API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_auth::AuthUser;
use mimo_common::{Error, Pagination, Result};

use crate::api::middleware::NotificationsState;
use crate::domain::entities::{Notification, NotificationKind};

/// Query params for listing notifications
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Notification response DTO
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            title: n.title,
            body: n.body,
            data: n.data.0,
            read_at: n.read_at,
            created_at: n.created_at,
        }
    }
}

/// Response for the unread-count endpoint
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// Response for the read-all endpoint
#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    pub marked_read: u64,
}

/// List the caller's notifications
pub async fn list_notifications(
    AuthUser(ctx): AuthUser,
    State(state): State<NotificationsState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<Vec<NotificationResponse>>> {
    let pagination = Pagination {
        offset: query.offset,
        limit: query.limit,
    };

    let notifications = state
        .repos
        .notifications
        .list_by_user(
            ctx.user.id,
            query.unread,
            pagination.offset(),
            pagination.limit(),
        )
        .await?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// Count the caller's unread notifications
pub async fn unread_count(
    AuthUser(ctx): AuthUser,
    State(state): State<NotificationsState>,
) -> Result<Json<UnreadCountResponse>> {
    let unread = state.repos.notifications.unread_count(ctx.user.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Mark one notification read (idempotent)
pub async fn mark_read(
    AuthUser(ctx): AuthUser,
    State(state): State<NotificationsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>> {
    let updated = state
        .repos
        .notifications
        .mark_read(id, ctx.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Notification not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Mark all of the caller's notifications read
pub async fn mark_all_read(
    AuthUser(ctx): AuthUser,
    State(state): State<NotificationsState>,
) -> Result<Json<ReadAllResponse>> {
    let marked_read = state.repos.notifications.mark_all_read(ctx.user.id).await?;
    Ok(Json(ReadAllResponse { marked_read }))
}
