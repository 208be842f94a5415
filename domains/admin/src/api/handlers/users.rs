//! Admin user listing handler

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_auth::{AdminUser, ProfileIdentity, UserRole};
use mimo_common::{Pagination, Result};

use crate::api::middleware::AdminState;

/// Query params for the user listing
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    pub q: Option<String>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Admin view of a user
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub suspended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileIdentity> for AdminUserResponse {
    fn from(p: ProfileIdentity) -> Self {
        Self {
            id: p.id,
            email: p.email,
            display_name: p.display_name,
            role: p.role,
            suspended_at: p.suspended_at,
            created_at: p.created_at,
        }
    }
}

/// GET /v1/admin/users — list users with role and search filters
pub async fn list_users(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<AdminUserResponse>>> {
    let pagination = Pagination {
        offset: query.offset,
        limit: query.limit,
    };

    let users = state
        .repos
        .admin
        .list_users(
            query.role,
            query.q.as_deref(),
            pagination.offset(),
            pagination.limit(),
        )
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}
