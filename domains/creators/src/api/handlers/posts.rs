//! Post API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::CreatorUser;
use mimo_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::handlers::{find_own_creator, find_public_creator};
use crate::api::middleware::CreatorsState;
use crate::domain::entities::Post;

/// Request for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub caption: String,
    pub media_url: Option<String>,
    /// Defaults to publishing immediately
    #[serde(default = "default_publish")]
    pub publish: bool,
}

fn default_publish() -> bool {
    true
}

/// Post response DTO
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub caption: String,
    pub media_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            creator_id: p.creator_id,
            caption: p.caption,
            media_url: p.media_url,
            published_at: p.published_at,
            created_at: p.created_at,
        }
    }
}

/// Public listing of a creator's published posts
pub async fn list_posts(
    State(state): State<CreatorsState>,
    Path(handle): Path<String>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<PostResponse>>> {
    let creator = find_public_creator(&state, &handle).await?;

    let posts = state
        .repos
        .posts
        .list_by_creator(creator.id, true, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// List own posts (drafts included)
pub async fn list_my_posts(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<PostResponse>>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let posts = state
        .repos
        .posts
        .list_by_creator(creator.id, false, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Create a post
pub async fn create_post(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>)> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let post = Post::new(creator.id, req.caption, req.media_url, req.publish)?;
    let created = state.repos.posts.create(&post).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete a post
pub async fn delete_post(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let deleted = state.repos.posts.delete(id, creator.id).await?;
    if !deleted {
        return Err(Error::NotFound("Post not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
