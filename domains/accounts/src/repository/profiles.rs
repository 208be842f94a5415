//! Profile repository

use crate::domain::entities::Profile;
use mimo_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find profile by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, email, display_name, avatar_url,
                   role, suspended_at, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create a profile row for a freshly registered account.
    ///
    /// Sign-up and the JIT path in the auth backend can race; the insert is
    /// idempotent and the stored row wins.
    pub async fn create(&self, profile: &Profile) -> Result<Profile> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, email, display_name, avatar_url,
                role, suspended_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.avatar_url)
        .bind(profile.role)
        .bind(profile.suspended_at)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        let stored = self.find(profile.id).await?.ok_or_else(|| {
            mimo_common::Error::Internal("Profile not found after insert".to_string())
        })?;

        Ok(stored)
    }

    /// Update own profile fields
    pub async fn update(
        &self,
        id: Uuid,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<Option<Profile>> {
        let updated = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                display_name = COALESCE($2, display_name),
                avatar_url = COALESCE($3, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, display_name, avatar_url,
                      role, suspended_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(display_name)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
