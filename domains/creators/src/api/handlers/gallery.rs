//! Gallery API handlers
//!
//! The order endpoint persists the web client's drag-and-drop result.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::CreatorUser;
use mimo_common::{Error, Result, ValidatedJson};

use crate::api::handlers::{find_own_creator, find_public_creator};
use crate::api::middleware::CreatorsState;
use crate::domain::entities::GalleryItem;

/// Request for adding a gallery item
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGalleryItemRequest {
    pub media_url: String,
    pub caption: Option<String>,
}

/// Request for reordering the gallery
#[derive(Debug, Deserialize, Validate)]
pub struct ReorderGalleryRequest {
    #[validate(length(min = 1))]
    pub ordered_ids: Vec<Uuid>,
}

/// Gallery item response DTO
#[derive(Debug, Serialize)]
pub struct GalleryItemResponse {
    pub id: Uuid,
    pub media_url: String,
    pub caption: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<GalleryItem> for GalleryItemResponse {
    fn from(i: GalleryItem) -> Self {
        Self {
            id: i.id,
            media_url: i.media_url,
            caption: i.caption,
            position: i.position,
            created_at: i.created_at,
        }
    }
}

/// Public listing of a creator's gallery in display order
pub async fn list_gallery(
    State(state): State<CreatorsState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<GalleryItemResponse>>> {
    let creator = find_public_creator(&state, &handle).await?;

    let items = state.repos.gallery.list_by_creator(creator.id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Append a gallery item
pub async fn create_gallery_item(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    ValidatedJson(req): ValidatedJson<CreateGalleryItemRequest>,
) -> Result<(StatusCode, Json<GalleryItemResponse>)> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let item = GalleryItem::new(creator.id, req.media_url, req.caption)?;
    let created = state.repos.gallery.create(&item).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete a gallery item
pub async fn delete_gallery_item(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let deleted = state.repos.gallery.delete(id, creator.id).await?;
    if !deleted {
        return Err(Error::NotFound("Gallery item not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Persist a drag-and-drop ordering of the gallery
pub async fn reorder_gallery(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    ValidatedJson(req): ValidatedJson<ReorderGalleryRequest>,
) -> Result<Json<Vec<GalleryItemResponse>>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let items = state
        .repos
        .gallery
        .reorder(creator.id, &req.ordered_ids)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
