//! Creator service repository

use crate::domain::entities::CreatorService;
use mimo_common::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const SERVICE_COLUMNS: &str = r#"
    id, creator_id, title, description, price,
    delivery_days, is_active, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find service by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<CreatorService>> {
        let service = sqlx::query_as::<_, CreatorService>(&format!(
            "SELECT {} FROM creator_services WHERE id = $1",
            SERVICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// List a creator's services, optionally only the active ones
    pub async fn list_by_creator(
        &self,
        creator_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<CreatorService>> {
        let services = sqlx::query_as::<_, CreatorService>(&format!(
            r#"
            SELECT {}
            FROM creator_services
            WHERE creator_id = $1 AND (NOT $2 OR is_active)
            ORDER BY created_at ASC
            "#,
            SERVICE_COLUMNS
        ))
        .bind(creator_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Create a new service
    pub async fn create(&self, service: &CreatorService) -> Result<CreatorService> {
        let created = sqlx::query_as::<_, CreatorService>(&format!(
            r#"
            INSERT INTO creator_services (
                id, creator_id, title, description, price,
                delivery_days, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(service.id)
        .bind(service.creator_id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.delivery_days)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update service fields (COALESCE semantics — absent fields unchanged)
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        delivery_days: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Option<CreatorService>> {
        let updated = sqlx::query_as::<_, CreatorService>(&format!(
            r#"
            UPDATE creator_services SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                delivery_days = COALESCE($5, delivery_days),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(delivery_days)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a service
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM creator_services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
