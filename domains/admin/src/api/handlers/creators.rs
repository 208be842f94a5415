//! Creator moderation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use mimo_auth::AdminUser;
use mimo_common::Result;

use crate::api::middleware::AdminState;

/// Response for moderation actions
#[derive(Debug, Serialize)]
pub struct ModerationResponse {
    pub creator_id: Uuid,
    pub user_id: Uuid,
    pub suspended: bool,
}

/// POST /v1/admin/creators/{id}/suspend — pull a creator off the platform
pub async fn suspend_creator(
    AdminUser(ctx): AdminUser,
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModerationResponse>> {
    let user_id = state.repos.admin.suspend_creator(id).await?;

    tracing::info!(admin_id = %ctx.user.id, creator_id = %id, "Suspension by admin");

    Ok(Json(ModerationResponse {
        creator_id: id,
        user_id,
        suspended: true,
    }))
}

/// POST /v1/admin/creators/{id}/reactivate — restore a suspended creator
pub async fn reactivate_creator(
    AdminUser(ctx): AdminUser,
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModerationResponse>> {
    let user_id = state.repos.admin.reactivate_creator(id).await?;

    tracing::info!(admin_id = %ctx.user.id, creator_id = %id, "Reactivation by admin");

    Ok(Json(ModerationResponse {
        creator_id: id,
        user_id,
        suspended: false,
    }))
}
