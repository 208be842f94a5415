//! GoTrue HTTP client
//!
//! Real client for the hosted platform's auth API at `{base_url}/auth/v1`.

use serde::Deserialize;
use uuid::Uuid;

use crate::provider::{
    AuthProvider, AuthProviderConfig, AuthSession, ProviderError, SignUpOutcome,
};

/// Session payload returned by GoTrue token-issuing endpoints.
#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserPayload,
}

/// User payload returned by GoTrue.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: String,
}

/// Error body returned by GoTrue.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
    #[serde(alias = "error_code")]
    code: Option<String>,
}

/// Real GoTrue HTTP client.
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    /// Create a new GoTrue client from configuration.
    pub fn new(config: AuthProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", config.base_url.trim_end_matches('/')),
            anon_key: config.anon_key,
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn read_error(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body: Option<ErrorPayload> = response.json().await.ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| status.to_string());

        match (status.as_u16(), body.and_then(|b| b.code)) {
            (400 | 401, _) if message.to_lowercase().contains("invalid login") => {
                ProviderError::InvalidCredentials
            }
            (422, Some(code)) if code == "user_already_exists" => {
                ProviderError::EmailAlreadyRegistered
            }
            (422, _) if message.to_lowercase().contains("already registered") => {
                ProviderError::EmailAlreadyRegistered
            }
            _ => ProviderError::Response(format!("GoTrue returned {}: {}", status, message)),
        }
    }
}

#[async_trait::async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ProviderError> {
        let response = self
            .request("/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        // With autoconfirm the body is a session; with email confirmation
        // pending it is the bare user object.
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        if body.get("access_token").is_some() {
            let session: SessionPayload = serde_json::from_value(body)
                .map_err(|e| ProviderError::Response(e.to_string()))?;
            Ok(SignUpOutcome {
                user_id: session.user.id,
                email: session.user.email.clone(),
                session: Some(AuthSession {
                    access_token: session.access_token,
                    refresh_token: session.refresh_token,
                    expires_in: session.expires_in,
                    user_id: session.user.id,
                    email: session.user.email,
                }),
            })
        } else {
            let user: UserPayload = serde_json::from_value(body)
                .map_err(|e| ProviderError::Response(e.to_string()))?;
            Ok(SignUpOutcome {
                user_id: user.id,
                email: user.email,
                session: None,
            })
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ProviderError> {
        let response = self
            .request("/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let session: SessionPayload = response
            .json()
            .await
            .map_err(|e| ProviderError::Response(e.to_string()))?;

        Ok(AuthSession {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user_id: session.user.id,
            email: session.user.email,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let response = self
            .request("/logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let response = self
            .request("/recover")
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        Ok(())
    }
}
