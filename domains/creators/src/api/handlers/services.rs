//! Creator service API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::CreatorUser;
use mimo_common::{Error, Result, ValidatedJson};

use crate::api::handlers::{find_own_creator, find_public_creator};
use crate::api::middleware::CreatorsState;
use crate::domain::entities::CreatorService;

/// Request for creating a service
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_days: i32,
}

/// Request for updating a service
#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub delivery_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Service response DTO
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub delivery_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CreatorService> for ServiceResponse {
    fn from(s: CreatorService) -> Self {
        Self {
            id: s.id,
            creator_id: s.creator_id,
            title: s.title,
            description: s.description,
            price: s.price,
            delivery_days: s.delivery_days,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Public listing of a creator's active services
pub async fn list_services(
    State(state): State<CreatorsState>,
    Path(handle): Path<String>,
) -> Result<Json<Vec<ServiceResponse>>> {
    let creator = find_public_creator(&state, &handle).await?;

    let services = state
        .repos
        .services
        .list_by_creator(creator.id, true)
        .await?;

    Ok(Json(services.into_iter().map(Into::into).collect()))
}

/// List own services (including inactive)
pub async fn list_my_services(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
) -> Result<Json<Vec<ServiceResponse>>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let services = state
        .repos
        .services
        .list_by_creator(creator.id, false)
        .await?;

    Ok(Json(services.into_iter().map(Into::into).collect()))
}

/// Create a service
pub async fn create_service(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    ValidatedJson(req): ValidatedJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>)> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let service = CreatorService::new(
        creator.id,
        req.title,
        req.description,
        req.price,
        req.delivery_days,
    )?;

    let created = state.repos.services.create(&service).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a service
pub async fn update_service(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let service = state
        .repos
        .services
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))?;

    if service.creator_id != creator.id {
        return Err(Error::NotFound("Service not found".to_string()));
    }

    if let Some(ref title) = req.title {
        CreatorService::validate_title(title)?;
    }
    if let Some(ref description) = req.description {
        CreatorService::validate_description(description)?;
    }
    if let Some(price) = req.price {
        crate::domain::entities::Creator::validate_price(price)?;
    }
    if let Some(days) = req.delivery_days {
        CreatorService::validate_delivery_days(days)?;
    }

    let updated = state
        .repos
        .services
        .update(
            id,
            req.title,
            req.description,
            req.price,
            req.delivery_days,
            req.is_active,
        )
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete a service
pub async fn delete_service(
    CreatorUser(ctx): CreatorUser,
    State(state): State<CreatorsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let creator = find_own_creator(&state, ctx.user.id).await?;

    let service = state
        .repos
        .services
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))?;

    if service.creator_id != creator.id {
        return Err(Error::NotFound("Service not found".to_string()));
    }

    state.repos.services.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
