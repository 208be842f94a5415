//! Service payment API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mimo_auth::AuthUser;
use mimo_common::{Error, Result};
use mimo_pix::CreateChargeRequest;

use crate::api::handlers::mimos::ListPaymentsQuery;
use crate::api::handlers::pix_error;
use crate::api::middleware::PaymentsState;
use crate::domain::entities::{PaymentStatus, ServicePayment};

/// PIX charges expire after one hour
const CHARGE_TTL_SECONDS: i64 = 3600;

/// Request for purchasing a service
#[derive(Debug, Deserialize)]
pub struct CreateServicePaymentRequest {
    pub service_id: Uuid,
}

/// Service payment response DTO
#[derive(Debug, Serialize)]
pub struct ServicePaymentResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub creator_id: Uuid,
    pub service_id: Uuid,
    pub conversation_id: Option<Uuid>,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub brcode: Option<String>,
    pub end_to_end_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServicePayment> for ServicePaymentResponse {
    fn from(p: ServicePayment) -> Self {
        Self {
            id: p.id,
            client_id: p.client_id,
            creator_id: p.creator_id,
            service_id: p.service_id,
            conversation_id: p.conversation_id,
            amount: p.amount,
            status: p.status,
            brcode: p.brcode,
            end_to_end_id: p.end_to_end_id,
            paid_at: p.paid_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response for a freshly created service payment
#[derive(Debug, Serialize)]
pub struct CreateServicePaymentResponse {
    pub payment: ServicePaymentResponse,
    pub brcode: String,
    pub qr_code_image_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Purchase a service: create the local record and the gateway charge
pub async fn create_service_payment(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    Json(req): Json<CreateServicePaymentRequest>,
) -> Result<(StatusCode, Json<CreateServicePaymentResponse>)> {
    let service = state
        .repos
        .service_payments
        .find_purchasable_service(req.service_id)
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))?;

    if service.creator_suspended_at.is_some() {
        return Err(Error::NotFound("Service not found".to_string()));
    }
    if !service.is_active {
        return Err(Error::Validation(
            "Service is not available for purchase".to_string(),
        ));
    }
    if service.creator_user_id == ctx.user.id {
        return Err(Error::Validation(
            "Cannot purchase your own service".to_string(),
        ));
    }

    let mut payment = ServicePayment::new(
        ctx.user.id,
        service.creator_user_id,
        service.id,
        service.price,
    )?;

    let charge = state
        .pix
        .create_charge(CreateChargeRequest {
            correlation_id: payment.id,
            amount: payment.amount,
            description: format!("'{}' by @{}", service.title, service.creator_handle),
            expires_in_seconds: Some(CHARGE_TTL_SECONDS),
        })
        .await
        .map_err(pix_error)?;

    payment.attach_charge(charge.txid, charge.brcode.clone());

    let created = state.repos.service_payments.create(&payment).await?;

    tracing::info!(
        payment_id = %created.id,
        service_id = %service.id,
        "Service payment charge created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateServicePaymentResponse {
            payment: created.into(),
            brcode: charge.brcode,
            qr_code_image_url: charge.qr_code_image_url,
            expires_at: charge.expires_at,
        }),
    ))
}

/// List the caller's service payments (bought and sold)
pub async fn list_service_payments(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<Vec<ServicePaymentResponse>>> {
    let payments = state
        .repos
        .service_payments
        .list_by_party(
            ctx.user.id,
            query.status,
            query.pagination().offset(),
            query.pagination().limit(),
        )
        .await?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Get a single service payment (parties only)
pub async fn get_service_payment(
    AuthUser(ctx): AuthUser,
    State(state): State<PaymentsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServicePaymentResponse>> {
    let payment = state
        .repos
        .service_payments
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Payment not found".to_string()))?;

    if payment.client_id != ctx.user.id && payment.creator_id != ctx.user.id {
        return Err(Error::NotFound("Payment not found".to_string()));
    }

    Ok(Json(payment.into()))
}
