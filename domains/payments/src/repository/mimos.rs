//! Mimo repository

use crate::domain::entities::{Mimo, PaymentStatus};
use crate::repository::MIMO_COLUMNS;
use chrono::{DateTime, Utc};
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Cross-domain read model: a creator that can receive tips
#[derive(Debug, sqlx::FromRow)]
pub struct TippableCreator {
    pub id: Uuid,
    pub user_id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub suspended_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct MimoRepository {
    pool: PgPool,
}

impl MimoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find mimo by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Mimo>> {
        let mimo = sqlx::query_as::<_, Mimo>(&format!(
            "SELECT {} FROM mimos WHERE id = $1",
            MIMO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mimo)
    }

    /// Find mimo by gateway transaction id (the reconciliation key)
    pub async fn find_by_txid(&self, txid: &str) -> Result<Option<Mimo>> {
        let mimo = sqlx::query_as::<_, Mimo>(&format!(
            "SELECT {} FROM mimos WHERE provider_tx_id = $1",
            MIMO_COLUMNS
        ))
        .bind(txid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mimo)
    }

    /// List mimos where the user is either party, newest first
    pub async fn list_by_party(
        &self,
        user_id: Uuid,
        status: Option<PaymentStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Mimo>> {
        let mimos = sqlx::query_as::<_, Mimo>(&format!(
            r#"
            SELECT {}
            FROM mimos
            WHERE (client_id = $1 OR creator_id = $1)
              AND ($2::payment_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            MIMO_COLUMNS
        ))
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(mimos)
    }

    /// Create a new mimo
    pub async fn create(&self, mimo: &Mimo) -> Result<Mimo> {
        let created = sqlx::query_as::<_, Mimo>(&format!(
            r#"
            INSERT INTO mimos (
                id, client_id, creator_id, amount, message, status,
                provider_tx_id, brcode, end_to_end_id, paid_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            MIMO_COLUMNS
        ))
        .bind(mimo.id)
        .bind(mimo.client_id)
        .bind(mimo.creator_id)
        .bind(mimo.amount)
        .bind(&mimo.message)
        .bind(mimo.status)
        .bind(&mimo.provider_tx_id)
        .bind(&mimo.brcode)
        .bind(&mimo.end_to_end_id)
        .bind(mimo.paid_at)
        .bind(mimo.created_at)
        .bind(mimo.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Resolve a creator profile for tipping (cross-domain read)
    pub async fn find_tippable_creator(
        &self,
        creator_id: Uuid,
    ) -> Result<Option<TippableCreator>> {
        let creator = sqlx::query_as::<_, TippableCreator>(
            "SELECT id, user_id, handle, display_name, suspended_at FROM creators WHERE id = $1",
        )
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creator)
    }
}
