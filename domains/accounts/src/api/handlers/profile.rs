//! Profile API handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::{AuthUser, ProfileIdentity, UserRole};
use mimo_common::{Error, Result, ValidatedJson};

use crate::api::middleware::AccountsState;
use crate::domain::entities::Profile;

/// Profile response DTO
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            display_name: p.display_name,
            avatar_url: p.avatar_url,
            role: p.role,
            suspended: p.suspended_at.is_some(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ProfileIdentity> for ProfileResponse {
    fn from(p: ProfileIdentity) -> Self {
        Self {
            id: p.id,
            email: p.email,
            display_name: p.display_name,
            avatar_url: p.avatar_url,
            role: p.role,
            suspended: p.suspended_at.is_some(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request for updating own profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,

    pub avatar_url: Option<String>,
}

/// Get own profile
pub async fn get_profile(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .repos
        .profiles
        .find(ctx.user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile.into()))
}

/// Update own profile
pub async fn update_profile(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    if let Some(ref name) = req.display_name {
        Profile::validate_display_name(name)?;
    }
    if let Some(ref url) = req.avatar_url {
        Profile::validate_avatar_url(url)?;
    }

    let updated = state
        .repos
        .profiles
        .update(ctx.user.id, req.display_name, req.avatar_url)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".to_string()))?;

    Ok(Json(updated.into()))
}
