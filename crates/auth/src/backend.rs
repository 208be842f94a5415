//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns auth-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) consistent with the
//! cross-domain read pattern used by the repositories.

use sqlx::PgPool;
use uuid::Uuid;

use crate::claims::SupabaseClaims;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::ProfileIdentity;

/// Concrete authentication backend.
///
/// Wraps a database pool and auth configuration. Provides methods
/// to look up profiles for authentication.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Find profile identity by ID (lightweight read model)
    pub async fn find_profile(&self, id: Uuid) -> Result<Option<ProfileIdentity>, AuthError> {
        let profile: Option<ProfileIdentity> = sqlx::query_as(
            r#"
            SELECT id, email, display_name, avatar_url,
                   role, suspended_at, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load profile");
            AuthError::UserLoadError
        })?;

        Ok(profile)
    }

    /// Provision a new profile from JWT claims (JIT provisioning).
    ///
    /// Called on first authenticated request when the user doesn't exist in
    /// the DB yet (the hosted auth platform created the account before this
    /// service saw it). Uses `ON CONFLICT DO NOTHING` to handle concurrent
    /// first-requests safely.
    async fn provision_profile_from_jwt(
        &self,
        user_id: Uuid,
        claims: &SupabaseClaims,
    ) -> Result<ProfileIdentity, AuthError> {
        let email = claims.email.as_deref().ok_or(AuthError::MissingEmail)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, role, created_at, updated_at)
            VALUES ($1, $2, 'client', NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to provision profile");
            AuthError::UserProvisionFailed
        })?;

        tracing::info!(user_id = %user_id, email = %email, "JIT profile provisioned");

        self.find_profile(user_id).await?.ok_or_else(|| {
            tracing::error!(user_id = %user_id, "Profile not found after provisioning");
            AuthError::UserProvisionFailed
        })
    }

    /// Shared JWT authentication logic used by the extractors.
    pub async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = match self.find_profile(user_id).await? {
            Some(profile) => profile,
            None => self.provision_profile_from_jwt(user_id, &claims).await?,
        };

        Ok(AuthContext::new(user))
    }
}
