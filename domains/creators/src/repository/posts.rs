//! Post repository

use crate::domain::entities::Post;
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = "id, creator_id, caption, media_url, published_at, created_at";

#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find post by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts WHERE id = $1",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// List a creator's posts; public callers only see published ones
    pub async fn list_by_creator(
        &self,
        creator_id: Uuid,
        published_only: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {}
            FROM posts
            WHERE creator_id = $1 AND (NOT $2 OR published_at IS NOT NULL)
            ORDER BY COALESCE(published_at, created_at) DESC
            LIMIT $3 OFFSET $4
            "#,
            POST_COLUMNS
        ))
        .bind(creator_id)
        .bind(published_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Create a new post
    pub async fn create(&self, post: &Post) -> Result<Post> {
        let created = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (id, creator_id, caption, media_url, published_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            POST_COLUMNS
        ))
        .bind(post.id)
        .bind(post.creator_id)
        .bind(&post.caption)
        .bind(&post.media_url)
        .bind(post.published_at)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Delete a post
    pub async fn delete(&self, id: Uuid, creator_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND creator_id = $2")
            .bind(id)
            .bind(creator_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
