//! Creator repository

use crate::domain::entities::{Creator, CreatorStatus};
use mimo_common::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Filters for the public explore/catalog listing
#[derive(Debug, Clone, Default)]
pub struct ExploreFilters {
    pub status: Option<CreatorStatus>,
    pub city: Option<String>,
    pub q: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
}

const CREATOR_COLUMNS: &str = r#"
    id, user_id, handle, display_name, bio, status,
    price_per_message, city, avatar_url, cover_url,
    suspended_at, created_at, updated_at
"#;

#[derive(Clone)]
pub struct CreatorRepository {
    pool: PgPool,
}

impl CreatorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find creator by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Creator>> {
        let creator = sqlx::query_as::<_, Creator>(&format!(
            "SELECT {} FROM creators WHERE id = $1",
            CREATOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creator)
    }

    /// Find creator by owning user
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Creator>> {
        let creator = sqlx::query_as::<_, Creator>(&format!(
            "SELECT {} FROM creators WHERE user_id = $1",
            CREATOR_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creator)
    }

    /// Find creator by public handle
    pub async fn find_by_handle(&self, handle: &str) -> Result<Option<Creator>> {
        let creator = sqlx::query_as::<_, Creator>(&format!(
            "SELECT {} FROM creators WHERE handle = $1",
            CREATOR_COLUMNS
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;

        Ok(creator)
    }

    /// Public explore/catalog listing.
    ///
    /// Suspended creators are always excluded; online creators sort first.
    pub async fn list(
        &self,
        filters: &ExploreFilters,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Creator>> {
        let search = filters.q.as_ref().map(|q| format!("%{}%", q));
        let city = filters.city.as_ref().map(|c| format!("%{}%", c));

        let creators = sqlx::query_as::<_, Creator>(&format!(
            r#"
            SELECT {}
            FROM creators
            WHERE suspended_at IS NULL
              AND ($1::creator_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR city ILIKE $2)
              AND ($3::text IS NULL OR display_name ILIKE $3 OR bio ILIKE $3)
              AND ($4::numeric IS NULL OR price_per_message >= $4)
              AND ($5::numeric IS NULL OR price_per_message <= $5)
            ORDER BY (status = 'online') DESC, updated_at DESC
            LIMIT $6 OFFSET $7
            "#,
            CREATOR_COLUMNS
        ))
        .bind(filters.status)
        .bind(city)
        .bind(search)
        .bind(filters.price_min)
        .bind(filters.price_max)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(creators)
    }

    /// Create a creator profile and promote the owning profile to the
    /// creator role in the same transaction.
    pub async fn create_with_role_promotion(&self, creator: &Creator) -> Result<Creator> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Creator>(&format!(
            r#"
            INSERT INTO creators (
                id, user_id, handle, display_name, bio, status,
                price_per_message, city, avatar_url, cover_url,
                suspended_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            CREATOR_COLUMNS
        ))
        .bind(creator.id)
        .bind(creator.user_id)
        .bind(&creator.handle)
        .bind(&creator.display_name)
        .bind(&creator.bio)
        .bind(creator.status)
        .bind(creator.price_per_message)
        .bind(&creator.city)
        .bind(&creator.avatar_url)
        .bind(&creator.cover_url)
        .bind(creator.suspended_at)
        .bind(creator.created_at)
        .bind(creator.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE profiles SET role = 'creator', updated_at = NOW() WHERE id = $1")
            .bind(creator.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Update profile fields (COALESCE semantics — absent fields unchanged)
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        display_name: Option<String>,
        bio: Option<String>,
        price_per_message: Option<Decimal>,
        city: Option<String>,
        avatar_url: Option<String>,
        cover_url: Option<String>,
    ) -> Result<Option<Creator>> {
        let updated = sqlx::query_as::<_, Creator>(&format!(
            r#"
            UPDATE creators SET
                display_name = COALESCE($2, display_name),
                bio = COALESCE($3, bio),
                price_per_message = COALESCE($4, price_per_message),
                city = COALESCE($5, city),
                avatar_url = COALESCE($6, avatar_url),
                cover_url = COALESCE($7, cover_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CREATOR_COLUMNS
        ))
        .bind(id)
        .bind(display_name)
        .bind(bio)
        .bind(price_per_message)
        .bind(city)
        .bind(avatar_url)
        .bind(cover_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Set the availability status
    pub async fn set_status(&self, id: Uuid, status: CreatorStatus) -> Result<Option<Creator>> {
        let updated = sqlx::query_as::<_, Creator>(&format!(
            r#"
            UPDATE creators SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CREATOR_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
