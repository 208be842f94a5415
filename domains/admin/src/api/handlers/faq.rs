//! FAQ handlers: public read + admin CRUD

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::AdminUser;
use mimo_common::{Error, Result, ValidatedJson};

use crate::api::middleware::AdminState;
use crate::domain::entities::FaqEntry;

/// Request for creating an FAQ entry
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

/// Request for updating an FAQ entry
#[derive(Debug, Deserialize)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub position: Option<i32>,
    pub published: Option<bool>,
}

/// FAQ entry response DTO
#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FaqEntry> for FaqResponse {
    fn from(e: FaqEntry) -> Self {
        Self {
            id: e.id,
            question: e.question,
            answer: e.answer,
            position: e.position,
            published: e.published,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// GET /v1/faq — public, published entries in display order
pub async fn list_public_faq(
    State(state): State<AdminState>,
) -> Result<Json<Vec<FaqResponse>>> {
    let entries = state.repos.faq.list(true).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /v1/admin/faq — all entries, drafts included
pub async fn list_faq(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
) -> Result<Json<Vec<FaqResponse>>> {
    let entries = state.repos.faq.list(false).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// POST /v1/admin/faq — create an entry
pub async fn create_faq(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
    ValidatedJson(req): ValidatedJson<CreateFaqRequest>,
) -> Result<(StatusCode, Json<FaqResponse>)> {
    let entry = FaqEntry::new(req.question, req.answer, req.published)?;
    let created = state.repos.faq.create(&entry).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PATCH /v1/admin/faq/{id} — update an entry
pub async fn update_faq(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFaqRequest>,
) -> Result<Json<FaqResponse>> {
    if let Some(ref question) = req.question {
        FaqEntry::validate_question(question)?;
    }
    if let Some(ref answer) = req.answer {
        FaqEntry::validate_answer(answer)?;
    }
    if let Some(position) = req.position {
        if position < 0 {
            return Err(Error::Validation("Position cannot be negative".to_string()));
        }
    }

    let updated = state
        .repos
        .faq
        .update(id, req.question, req.answer, req.position, req.published)
        .await?
        .ok_or_else(|| Error::NotFound("FAQ entry not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// DELETE /v1/admin/faq/{id} — delete an entry
pub async fn delete_faq(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.faq.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("FAQ entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
