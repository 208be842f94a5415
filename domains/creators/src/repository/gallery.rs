//! Gallery repository
//!
//! Positions are a dense 0-based sequence per creator. Appends take the
//! next tail position; reorder rewrites the whole sequence in one
//! transaction.

use std::collections::HashSet;

use crate::domain::entities::GalleryItem;
use mimo_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

const GALLERY_COLUMNS: &str = "id, creator_id, media_url, caption, position, created_at";

#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find gallery item by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<GalleryItem>> {
        let item = sqlx::query_as::<_, GalleryItem>(&format!(
            "SELECT {} FROM gallery_items WHERE id = $1",
            GALLERY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List a creator's gallery in display order
    pub async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<GalleryItem>> {
        let items = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            SELECT {}
            FROM gallery_items
            WHERE creator_id = $1
            ORDER BY position ASC
            "#,
            GALLERY_COLUMNS
        ))
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Append a gallery item at the tail position
    pub async fn create(&self, item: &GalleryItem) -> Result<GalleryItem> {
        let created = sqlx::query_as::<_, GalleryItem>(&format!(
            r#"
            INSERT INTO gallery_items (id, creator_id, media_url, caption, position, created_at)
            SELECT $1, $2, $3, $4,
                   COALESCE(MAX(position) + 1, 0), $5
            FROM gallery_items
            WHERE creator_id = $2
            RETURNING {}
            "#,
            GALLERY_COLUMNS
        ))
        .bind(item.id)
        .bind(item.creator_id)
        .bind(&item.media_url)
        .bind(&item.caption)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Delete a gallery item and close the position gap
    pub async fn delete(&self, id: Uuid, creator_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(i32,)> = sqlx::query_as(
            "DELETE FROM gallery_items WHERE id = $1 AND creator_id = $2 RETURNING position",
        )
        .bind(id)
        .bind(creator_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((position,)) = deleted else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query(
            "UPDATE gallery_items SET position = position - 1
             WHERE creator_id = $1 AND position > $2",
        )
        .bind(creator_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Persist a drag-and-drop ordering.
    ///
    /// `ordered_ids` must be a permutation of the creator's current gallery;
    /// positions are rewritten 0..n-1 in one transaction.
    pub async fn reorder(&self, creator_id: Uuid, ordered_ids: &[Uuid]) -> Result<Vec<GalleryItem>> {
        let mut tx = self.pool.begin().await?;

        let current: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM gallery_items WHERE creator_id = $1 FOR UPDATE")
                .bind(creator_id)
                .fetch_all(&mut *tx)
                .await?;

        let current_set: HashSet<Uuid> = current.iter().map(|(id,)| *id).collect();
        let submitted_set: HashSet<Uuid> = ordered_ids.iter().copied().collect();

        if submitted_set.len() != ordered_ids.len() {
            return Err(Error::Validation(
                "Order must not contain duplicate items".to_string(),
            ));
        }
        if current_set != submitted_set {
            return Err(Error::Validation(
                "Order must include every gallery item exactly once".to_string(),
            ));
        }

        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE gallery_items SET position = $1 WHERE id = $2 AND creator_id = $3",
            )
            .bind(position as i32)
            .bind(id)
            .bind(creator_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.list_by_creator(creator_id).await
    }
}
