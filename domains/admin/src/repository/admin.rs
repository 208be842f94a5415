//! Admin read models and moderation writes
//!
//! This repository reads across domain tables (profiles, creators, mimos,
//! service_payments) to power the dashboard.

use chrono::{DateTime, Utc};
use mimo_auth::{ProfileIdentity, UserRole};
use mimo_common::{Error, Result};
use mimo_payments::PaymentStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// User counts by role
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserCounts {
    pub clients: i64,
    pub creators: i64,
    pub admins: i64,
    pub total: i64,
}

/// Creator counts by availability status
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatorStatusCounts {
    pub online: i64,
    pub busy: i64,
    pub offline: i64,
    pub suspended: i64,
}

/// Payment counts and settled volume for one payment kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentKindStats {
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub failed: i64,
    pub cancelled: i64,
    pub completed_volume: Decimal,
}

/// Unified payment listing row across mimos and service payments
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminPaymentRow {
    pub id: Uuid,
    pub kind: String,
    pub client_id: Uuid,
    pub creator_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub provider_tx_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct StatusCountRow {
    status: String,
    count: i64,
    volume: Option<Decimal>,
}

const PAYMENT_ROW_COLUMNS: &str = r#"
    id, client_id, creator_id, amount, status,
    provider_tx_id, paid_at, created_at
"#;

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count users by role
    pub async fn user_counts(&self) -> Result<UserCounts> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT role::text, COUNT(*) FROM profiles GROUP BY role")
                .fetch_all(&self.pool)
                .await?;

        let mut counts = UserCounts::default();
        for (role, count) in rows {
            match role.as_str() {
                "client" => counts.clients = count,
                "creator" => counts.creators = count,
                "admin" => counts.admins = count,
                other => tracing::warn!(role = other, "Unknown role in user counts"),
            }
            counts.total += count;
        }

        Ok(counts)
    }

    /// Count creators by availability status (suspended tracked separately)
    pub async fn creator_status_counts(&self) -> Result<CreatorStatusCounts> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT CASE WHEN suspended_at IS NOT NULL THEN 'suspended' ELSE status::text END,
                   COUNT(*)
            FROM creators
            GROUP BY 1
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = CreatorStatusCounts::default();
        for (status, count) in rows {
            match status.as_str() {
                "online" => counts.online = count,
                "busy" => counts.busy = count,
                "offline" => counts.offline = count,
                "suspended" => counts.suspended = count,
                other => tracing::warn!(status = other, "Unknown status in creator counts"),
            }
        }

        Ok(counts)
    }

    /// Payment stats for the mimos table
    pub async fn mimo_stats(&self) -> Result<PaymentKindStats> {
        self.payment_stats("mimos").await
    }

    /// Payment stats for the service_payments table
    pub async fn service_payment_stats(&self) -> Result<PaymentKindStats> {
        self.payment_stats("service_payments").await
    }

    async fn payment_stats(&self, table: &str) -> Result<PaymentKindStats> {
        let rows: Vec<StatusCountRow> = sqlx::query_as(&format!(
            r#"
            SELECT status::text AS status, COUNT(*) AS count,
                   SUM(amount) FILTER (WHERE status = 'completed') AS volume
            FROM {}
            GROUP BY status
            "#,
            table
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut stats = PaymentKindStats::default();
        for row in rows {
            match row.status.as_str() {
                "pending" => stats.pending = row.count,
                "processing" => stats.processing = row.count,
                "completed" => {
                    stats.completed = row.count;
                    stats.completed_volume = row.volume.unwrap_or_default();
                }
                "failed" => stats.failed = row.count,
                "cancelled" => stats.cancelled = row.count,
                other => tracing::warn!(status = other, "Unknown status in payment stats"),
            }
        }

        Ok(stats)
    }

    /// List users with role and email/name search filters
    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        q: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProfileIdentity>> {
        let search = q.map(|q| format!("%{}%", q));

        let users = sqlx::query_as::<_, ProfileIdentity>(
            r#"
            SELECT id, email, display_name, avatar_url,
                   role, suspended_at, created_at, updated_at
            FROM profiles
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::text IS NULL OR email ILIKE $2 OR display_name ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(role)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Unified mimo/service payment listing
    pub async fn list_payments(
        &self,
        kind: Option<&str>,
        status: Option<PaymentStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AdminPaymentRow>> {
        let payments = match kind {
            Some("mimo") => {
                sqlx::query_as::<_, AdminPaymentRow>(&format!(
                    r#"
                    SELECT 'mimo' AS kind, {} FROM mimos
                    WHERE ($1::payment_status IS NULL OR status = $1)
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                    PAYMENT_ROW_COLUMNS
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            Some("service") => {
                sqlx::query_as::<_, AdminPaymentRow>(&format!(
                    r#"
                    SELECT 'service' AS kind, {} FROM service_payments
                    WHERE ($1::payment_status IS NULL OR status = $1)
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                    PAYMENT_ROW_COLUMNS
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            Some(other) => {
                return Err(Error::Validation(format!(
                    "Unknown payment kind: '{}'. Expected mimo or service",
                    other
                )))
            }
            None => {
                sqlx::query_as::<_, AdminPaymentRow>(&format!(
                    r#"
                    SELECT * FROM (
                        SELECT 'mimo' AS kind, {columns} FROM mimos
                        UNION ALL
                        SELECT 'service' AS kind, {columns} FROM service_payments
                    ) payments
                    WHERE ($1::payment_status IS NULL OR status = $1)
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                    columns = PAYMENT_ROW_COLUMNS
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(payments)
    }

    /// Suspend a creator: stamps the creator row and its owning profile.
    ///
    /// Returns the owning user id; suspending twice is a conflict.
    pub async fn suspend_creator(&self, creator_id: Uuid) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(Uuid, Option<DateTime<Utc>>)> =
            sqlx::query_as("SELECT user_id, suspended_at FROM creators WHERE id = $1 FOR UPDATE")
                .bind(creator_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((user_id, suspended_at)) = row else {
            return Err(Error::NotFound("Creator not found".to_string()));
        };
        if suspended_at.is_some() {
            return Err(Error::Conflict("Creator is already suspended".to_string()));
        }

        sqlx::query("UPDATE creators SET suspended_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(creator_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE profiles SET suspended_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(creator_id = %creator_id, user_id = %user_id, "Creator suspended");
        Ok(user_id)
    }

    /// Reactivate a suspended creator
    pub async fn reactivate_creator(&self, creator_id: Uuid) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(Uuid, Option<DateTime<Utc>>)> =
            sqlx::query_as("SELECT user_id, suspended_at FROM creators WHERE id = $1 FOR UPDATE")
                .bind(creator_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((user_id, suspended_at)) = row else {
            return Err(Error::NotFound("Creator not found".to_string()));
        };
        if suspended_at.is_none() {
            return Err(Error::Conflict("Creator is not suspended".to_string()));
        }

        sqlx::query("UPDATE creators SET suspended_at = NULL, updated_at = NOW() WHERE id = $1")
            .bind(creator_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE profiles SET suspended_at = NULL, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(creator_id = %creator_id, user_id = %user_id, "Creator reactivated");
        Ok(user_id)
    }
}
