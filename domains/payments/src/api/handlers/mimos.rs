//! Mimo (tip) API handlers

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

use mimo_auth::AuthUser;
use mimo_common::{Error, Pagination, Result, ValidatedJson};
use mimo_pix::CreateChargeRequest;

use crate::api::handlers::pix_error;
use crate::api::middleware::PaymentsState;
use crate::domain::entities::{Mimo, PaymentStatus};

/// PIX charges expire after one hour
const CHARGE_TTL_SECONDS: i64 = 3600;

/// Request for sending a mimo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMimoRequest {
    /// Creator profile id (as shown on the public profile)
    pub creator_id: Uuid,
    pub amount: Decimal,
    #[validate(length(max = 280))]
    pub message: Option<String>,
}

/// Query params for listing payments
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListPaymentsQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Mimo response DTO
#[derive(Debug, Serialize)]
pub struct MimoResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub creator_id: Uuid,
    pub amount: Decimal,
    pub message: Option<String>,
    pub status: PaymentStatus,
    pub brcode: Option<String>,
    pub end_to_end_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mimo> for MimoResponse {
    fn from(m: Mimo) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            creator_id: m.creator_id,
            amount: m.amount,
            message: m.message,
            status: m.status,
            brcode: m.brcode,
            end_to_end_id: m.end_to_end_id,
            paid_at: m.paid_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Response for a freshly created mimo: the record plus what the payer
/// needs to settle the charge
#[derive(Debug, Serialize)]
pub struct CreateMimoResponse {
    pub mimo: MimoResponse,
    pub brcode: String,
    pub qr_code_image_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Send a mimo: create the local record and the gateway charge
pub async fn create_mimo(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    ValidatedJson(req): ValidatedJson<CreateMimoRequest>,
) -> Result<(StatusCode, Json<CreateMimoResponse>)> {
    let creator = state
        .repos
        .mimos
        .find_tippable_creator(req.creator_id)
        .await?
        .ok_or_else(|| Error::NotFound("Creator not found".to_string()))?;

    if creator.suspended_at.is_some() {
        return Err(Error::NotFound("Creator not found".to_string()));
    }
    if creator.user_id == ctx.user.id {
        return Err(Error::Validation(
            "Cannot send a mimo to yourself".to_string(),
        ));
    }

    let mut mimo = Mimo::new(ctx.user.id, creator.user_id, req.amount, req.message)?;

    let charge = state
        .pix
        .create_charge(CreateChargeRequest {
            correlation_id: mimo.id,
            amount: mimo.amount,
            description: format!("Mimo for @{}", creator.handle),
            expires_in_seconds: Some(CHARGE_TTL_SECONDS),
        })
        .await
        .map_err(pix_error)?;

    mimo.attach_charge(charge.txid, charge.brcode.clone());

    let created = state.repos.mimos.create(&mimo).await?;

    tracing::info!(mimo_id = %created.id, creator = %creator.handle, "Mimo charge created");

    Ok((
        StatusCode::CREATED,
        Json(CreateMimoResponse {
            mimo: created.into(),
            brcode: charge.brcode,
            qr_code_image_url: charge.qr_code_image_url,
            expires_at: charge.expires_at,
        }),
    ))
}

/// List the caller's mimos (sent and received)
pub async fn list_mimos(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<MimoResponse>>> {
    let mimos = state
        .repos
        .mimos
        .list_by_party(
            ctx.user.id,
            query.status,
            query.pagination().offset(),
            query.pagination().limit(),
        )
        .await?;

    Ok(Json(mimos.into_iter().map(Into::into).collect()))
}

/// Get a single mimo (parties only)
pub async fn get_mimo(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MimoResponse>> {
    let mimo = state
        .repos
        .mimos
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Mimo not found".to_string()))?;

    if mimo.client_id != ctx.user.id && mimo.creator_id != ctx.user.id {
        return Err(Error::NotFound("Mimo not found".to_string()));
    }

    Ok(Json(mimo.into()))
}
