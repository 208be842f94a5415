//! Creator profile API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::{AuthUser, CreatorUser};
use mimo_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::handlers::{find_own_creator, find_public_creator};
use crate::api::middleware::CreatorsState;
use crate::domain::entities::{Creator, CreatorStatus};
use crate::repository::ExploreFilters;

/// Query params for the explore/catalog listing
#[derive(Debug, Deserialize)]
pub struct ExploreQuery {
    pub status: Option<CreatorStatus>,
    pub city: Option<String>,
    pub q: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Request for creating a creator profile
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCreatorRequest {
    pub handle: String,
    pub display_name: String,
    pub price_per_message: Decimal,
    pub bio: Option<String>,
    pub city: Option<String>,
}

/// Request for updating own creator profile
#[derive(Debug, Deserialize)]
pub struct UpdateCreatorRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub price_per_message: Option<Decimal>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
}

/// Request for setting availability status
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: CreatorStatus,
}

/// Creator response DTO
#[derive(Debug, Serialize)]
pub struct CreatorResponse {
    pub id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub status: CreatorStatus,
    pub price_per_message: Decimal,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Creator> for CreatorResponse {
    fn from(c: Creator) -> Self {
        Self {
            id: c.id,
            handle: c.handle,
            display_name: c.display_name,
            bio: c.bio,
            status: c.status,
            price_per_message: c.price_per_message,
            city: c.city,
            avatar_url: c.avatar_url,
            cover_url: c.cover_url,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Public explore/catalog listing
pub async fn explore(
    State(state): State<CreatorsState>,
    Query(query): Query<ExploreQuery>,
) -> Result<Json<Vec<CreatorResponse>>> {
    let filters = ExploreFilters {
        status: query.status,
        city: query.city,
        q: query.q,
        price_min: query.price_min,
        price_max: query.price_max,
    };
    let pagination = Pagination {
        offset: query.offset,
        limit: query.limit,
    };

    let creators = state
        .repos
        .creators
        .list(&filters, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(creators.into_iter().map(Into::into).collect()))
}

/// Public creator profile by handle
pub async fn get_creator(
    State(state): State<CreatorsState>,
    Path(handle): Path<String>,
) -> Result<Json<CreatorResponse>> {
    let creator = find_public_creator(&state, &handle).await?;
    Ok(Json(creator.into()))
}

/// Create own creator profile.
///
/// Open to any authenticated user; promotes the profile role to creator.
pub async fn create_creator(
    AuthUser(ctx): AuthUser,
    State(state): State<CreatorsState>,
    ValidatedJson(req): ValidatedJson<CreateCreatorRequest>,
) -> Result<(StatusCode, Json<CreatorResponse>)> {
    if ctx.is_suspended() {
        return Err(Error::Authorization("Account is suspended".to_string()));
    }

    if state
        .repos
        .creators
        .find_by_user(ctx.user.id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "Creator profile already exists".to_string(),
        ));
    }

    if state
        .repos
        .creators
        .find_by_handle(&req.handle)
        .await?
        .is_some()
    {
        return Err(Error::Conflict("Handle is already taken".to_string()));
    }

    let mut creator = Creator::new(
        ctx.user.id,
        req.handle,
        req.display_name,
        req.price_per_message,
    )?;

    if let Some(bio) = req.bio {
        Creator::validate_bio(&bio)?;
        creator.bio = Some(bio);
    }
    if let Some(city) = req.city {
        Creator::validate_city(&city)?;
        creator.city = Some(city);
    }

    let created = state
        .repos
        .creators
        .create_with_role_promotion(&creator)
        .await?;

    tracing::info!(creator_id = %created.id, handle = %created.handle, "Creator profile created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get own creator profile
pub async fn get_my_creator(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
) -> Result<Json<CreatorResponse>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;
    Ok(Json(creator.into()))
}

/// Update own creator profile
pub async fn update_my_creator(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Json(req): Json<UpdateCreatorRequest>,
) -> Result<Json<CreatorResponse>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    if let Some(ref name) = req.display_name {
        Creator::validate_display_name(name)?;
    }
    if let Some(ref bio) = req.bio {
        Creator::validate_bio(bio)?;
    }
    if let Some(price) = req.price_per_message {
        Creator::validate_price(price)?;
    }
    if let Some(ref city) = req.city {
        Creator::validate_city(city)?;
    }
    if let Some(ref url) = req.avatar_url {
        Creator::validate_media_url(url)?;
    }
    if let Some(ref url) = req.cover_url {
        Creator::validate_media_url(url)?;
    }

    let updated = state
        .repos
        .creators
        .update(
            creator.id,
            req.display_name,
            req.bio,
            req.price_per_message,
            req.city,
            req.avatar_url,
            req.cover_url,
        )
        .await?
        .ok_or_else(|| Error::NotFound("Creator profile not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Set own availability status
pub async fn set_my_status(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<CreatorResponse>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let updated = state
        .repos
        .creators
        .set_status(creator.id, req.status)
        .await?
        .ok_or_else(|| Error::NotFound("Creator profile not found".to_string()))?;

    Ok(Json(updated.into()))
}
