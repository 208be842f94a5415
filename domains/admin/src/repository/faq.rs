//! FAQ repository

use crate::domain::entities::FaqEntry;
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

const FAQ_COLUMNS: &str = "id, question, answer, position, published, created_at, updated_at";

#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find FAQ entry by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<FaqEntry>> {
        let entry = sqlx::query_as::<_, FaqEntry>(&format!(
            "SELECT {} FROM faq_entries WHERE id = $1",
            FAQ_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// List entries in display order; public callers only see published ones
    pub async fn list(&self, published_only: bool) -> Result<Vec<FaqEntry>> {
        let entries = sqlx::query_as::<_, FaqEntry>(&format!(
            r#"
            SELECT {}
            FROM faq_entries
            WHERE (NOT $1 OR published)
            ORDER BY position ASC
            "#,
            FAQ_COLUMNS
        ))
        .bind(published_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Append an entry at the tail position
    pub async fn create(&self, entry: &FaqEntry) -> Result<FaqEntry> {
        let created = sqlx::query_as::<_, FaqEntry>(&format!(
            r#"
            INSERT INTO faq_entries (id, question, answer, position, published, created_at, updated_at)
            SELECT $1, $2, $3, COALESCE(MAX(position) + 1, 0), $4, $5, $6
            FROM faq_entries
            RETURNING {}
            "#,
            FAQ_COLUMNS
        ))
        .bind(entry.id)
        .bind(&entry.question)
        .bind(&entry.answer)
        .bind(entry.published)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update entry fields (COALESCE semantics — absent fields unchanged)
    pub async fn update(
        &self,
        id: Uuid,
        question: Option<String>,
        answer: Option<String>,
        position: Option<i32>,
        published: Option<bool>,
    ) -> Result<Option<FaqEntry>> {
        let updated = sqlx::query_as::<_, FaqEntry>(&format!(
            r#"
            UPDATE faq_entries SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                position = COALESCE($4, position),
                published = COALESCE($5, published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            FAQ_COLUMNS
        ))
        .bind(id)
        .bind(question)
        .bind(answer)
        .bind(position)
        .bind(published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an entry
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faq_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
