//! Admin payment listing handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use mimo_auth::AdminUser;
use mimo_common::{Pagination, Result};
use mimo_payments::PaymentStatus;

use crate::api::middleware::AdminState;
use crate::repository::AdminPaymentRow;

/// Query params for the unified payment listing
#[derive(Debug, Deserialize)]
pub struct ListAdminPaymentsQuery {
    /// "mimo" or "service"; absent means both
    pub kind: Option<String>,
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// GET /v1/admin/payments — unified mimo/service payment listing
pub async fn list_payments(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
    Query(query): Query<ListAdminPaymentsQuery>,
) -> Result<Json<Vec<AdminPaymentRow>>> {
    let pagination = Pagination {
        offset: query.offset,
        limit: query.limit,
    };

    let payments = state
        .repos
        .admin
        .list_payments(
            query.kind.as_deref(),
            query.status,
            pagination.offset(),
            pagination.limit(),
        )
        .await?;

    Ok(Json(payments))
}
