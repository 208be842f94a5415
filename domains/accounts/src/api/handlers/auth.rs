//! Authentication API handlers
//!
//! Implements:
//! - POST /v1/auth/signup — Register an account with the hosted auth platform
//! - POST /v1/auth/signin — Exchange email + password for a session
//! - POST /v1/auth/signout — Revoke the caller's session
//! - POST /v1/auth/reset-password — Send a password recovery email
//! - GET /v1/auth/whoami — Return authentication context for the current caller

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mimo_auth::{AuthSession, AuthUser, ProviderError, UserRole};
use mimo_common::{Error, Result, ValidatedJson};

use crate::api::handlers::profile::ProfileResponse;
use crate::api::middleware::AccountsState;
use crate::domain::entities::Profile;

/// Map provider failures onto the API error taxonomy
fn provider_error(err: ProviderError) -> Error {
    match err {
        ProviderError::InvalidCredentials => {
            Error::Authentication("Invalid email or password".to_string())
        }
        ProviderError::EmailAlreadyRegistered => {
            Error::Conflict("Email is already registered".to_string())
        }
        ProviderError::Configuration(msg) => Error::Internal(msg),
        ProviderError::Request(msg) | ProviderError::Response(msg) => Error::Upstream(msg),
    }
}

/// Request for registering an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

/// Request for signing in
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request for password recovery
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Session DTO returned by signup/signin
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<AuthSession> for SessionResponse {
    fn from(s: AuthSession) -> Self {
        Self {
            access_token: s.access_token,
            refresh_token: s.refresh_token,
            expires_in: s.expires_in,
        }
    }
}

/// Response for POST /v1/auth/signup
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_id: Uuid,
    pub email: String,
    /// Absent while email confirmation is pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionResponse>,
}

/// Response for POST /v1/auth/signin
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub session: SessionResponse,
    pub profile: ProfileResponse,
}

/// Response shape for GET /v1/auth/whoami
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub role: UserRole,
    pub profile: ProfileResponse,
}

/// Register a new account
pub async fn signup(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>)> {
    let outcome = state
        .provider
        .sign_up(&req.email, &req.password)
        .await
        .map_err(provider_error)?;

    let profile = Profile::new(outcome.user_id, outcome.email.clone(), req.display_name)?;
    state.repos.profiles.create(&profile).await?;

    tracing::info!(user_id = %outcome.user_id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: outcome.user_id,
            email: outcome.email,
            session: outcome.session.map(Into::into),
        }),
    ))
}

/// Exchange email + password for a session
pub async fn signin(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let session = state
        .provider
        .sign_in(&req.email, &req.password)
        .await
        .map_err(provider_error)?;

    // Accounts created directly on the hosted platform may not have a
    // profile row yet; provision one on first sign-in.
    let profile = match state.repos.profiles.find(session.user_id).await? {
        Some(profile) => profile,
        None => {
            let profile = Profile::new(session.user_id, session.email.clone(), None)?;
            state.repos.profiles.create(&profile).await?
        }
    };

    Ok(Json(SignInResponse {
        session: session.into(),
        profile: profile.into(),
    }))
}

/// Revoke the caller's session
pub async fn signout(
    AuthUser(_ctx): AuthUser,
    State(state): State<AccountsState>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    // AuthUser already proved the header exists and the token is valid
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Authentication("Authorization header required".to_string()))?;

    state
        .provider
        .sign_out(token)
        .await
        .map_err(provider_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Send a password recovery email.
///
/// Always 202 so the endpoint cannot be used for account enumeration.
pub async fn reset_password(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<StatusCode> {
    if let Err(e) = state.provider.send_password_reset(&req.email).await {
        tracing::warn!(error = %e, "Password reset request failed");
    }

    Ok(StatusCode::ACCEPTED)
}

/// Return authentication context for the current caller
pub async fn whoami(AuthUser(ctx): AuthUser) -> Result<Json<WhoamiResponse>> {
    Ok(Json(WhoamiResponse {
        role: ctx.user.role,
        profile: ctx.user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignUpRequest {
            email: "ana@example.com".to_string(),
            password: "longenough".to_string(),
            display_name: Some("Ana".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignUpRequest {
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
            display_name: None,
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignUpRequest {
            email: "ana@example.com".to_string(),
            password: "short".to_string(),
            display_name: None,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_provider_error_mapping() {
        assert_eq!(
            provider_error(ProviderError::InvalidCredentials).status_code(),
            axum::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            provider_error(ProviderError::EmailAlreadyRegistered).status_code(),
            axum::http::StatusCode::CONFLICT
        );
        assert_eq!(
            provider_error(ProviderError::Request("boom".to_string())).status_code(),
            axum::http::StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            provider_error(ProviderError::Configuration("boom".to_string())).status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
