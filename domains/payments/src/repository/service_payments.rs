//! Service payment repository

use crate::domain::entities::{PaymentStatus, ServicePayment};
use crate::repository::SERVICE_PAYMENT_COLUMNS;
use chrono::{DateTime, Utc};
use mimo_common::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Cross-domain read model: a purchasable service with its creator
#[derive(Debug, sqlx::FromRow)]
pub struct PurchasableService {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub creator_user_id: Uuid,
    pub creator_handle: String,
    pub title: String,
    pub price: Decimal,
    pub is_active: bool,
    pub creator_suspended_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ServicePaymentRepository {
    pool: PgPool,
}

impl ServicePaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find service payment by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<ServicePayment>> {
        let payment = sqlx::query_as::<_, ServicePayment>(&format!(
            "SELECT {} FROM service_payments WHERE id = $1",
            SERVICE_PAYMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Find service payment by gateway transaction id
    pub async fn find_by_txid(&self, txid: &str) -> Result<Option<ServicePayment>> {
        let payment = sqlx::query_as::<_, ServicePayment>(&format!(
            "SELECT {} FROM service_payments WHERE provider_tx_id = $1",
            SERVICE_PAYMENT_COLUMNS
        ))
        .bind(txid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// List service payments where the user is either party, newest first
    pub async fn list_by_party(
        &self,
        user_id: Uuid,
        status: Option<PaymentStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ServicePayment>> {
        let payments = sqlx::query_as::<_, ServicePayment>(&format!(
            r#"
            SELECT {}
            FROM service_payments
            WHERE (client_id = $1 OR creator_id = $1)
              AND ($2::payment_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            SERVICE_PAYMENT_COLUMNS
        ))
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Create a new service payment
    pub async fn create(&self, payment: &ServicePayment) -> Result<ServicePayment> {
        let created = sqlx::query_as::<_, ServicePayment>(&format!(
            r#"
            INSERT INTO service_payments (
                id, client_id, creator_id, service_id, conversation_id,
                amount, status, provider_tx_id, brcode, end_to_end_id,
                paid_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            SERVICE_PAYMENT_COLUMNS
        ))
        .bind(payment.id)
        .bind(payment.client_id)
        .bind(payment.creator_id)
        .bind(payment.service_id)
        .bind(payment.conversation_id)
        .bind(payment.amount)
        .bind(payment.status)
        .bind(&payment.provider_tx_id)
        .bind(&payment.brcode)
        .bind(&payment.end_to_end_id)
        .bind(payment.paid_at)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Resolve a service into a purchasable read model (cross-domain read)
    pub async fn find_purchasable_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<PurchasableService>> {
        let service = sqlx::query_as::<_, PurchasableService>(
            r#"
            SELECT s.id, s.creator_id, c.user_id AS creator_user_id,
                   c.handle AS creator_handle, s.title, s.price, s.is_active,
                   c.suspended_at AS creator_suspended_at
            FROM creator_services s
            INNER JOIN creators c ON c.id = s.creator_id
            WHERE s.id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }
}
