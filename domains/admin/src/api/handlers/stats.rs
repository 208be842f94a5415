//! Dashboard stats handler

use axum::{extract::State, Json};
use serde::Serialize;

use mimo_auth::AdminUser;
use mimo_common::Result;

use crate::api::middleware::AdminState;
use crate::repository::{CreatorStatusCounts, PaymentKindStats, UserCounts};

/// Aggregate dashboard stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: UserCounts,
    pub creators: CreatorStatusCounts,
    pub mimos: PaymentKindStats,
    pub service_payments: PaymentKindStats,
}

/// GET /v1/admin/stats — platform-wide counters for the dashboard
pub async fn get_stats(
    AdminUser(_ctx): AdminUser,
    State(state): State<AdminState>,
) -> Result<Json<StatsResponse>> {
    let users = state.repos.admin.user_counts().await?;
    let creators = state.repos.admin.creator_status_counts().await?;
    let mimos = state.repos.admin.mimo_stats().await?;
    let service_payments = state.repos.admin.service_payment_stats().await?;

    Ok(Json(StatsResponse {
        users,
        creators,
        mimos,
        service_payments,
    }))
}
