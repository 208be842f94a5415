//! Mimo application composition root
//!
//! Composes all domain routers into a single application.

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use mimo_accounts::{AccountsRepositories, AccountsState};
use mimo_admin::{AdminRepositories, AdminState};
use mimo_auth::{AuthBackend, AuthConfig, AuthProviderConfig, AuthProviderFactory};
use mimo_common::Config;
use mimo_conversations::{ConversationsRepositories, ConversationsState, RealtimeHub};
use mimo_creators::{CreatorsRepositories, CreatorsState};
use mimo_email::{EmailConfig, EmailServiceFactory};
use mimo_notifications::{NotificationsRepositories, NotificationsState};
use mimo_payments::{PaymentsRepositories, PaymentsState};
use mimo_pix::{PixConfig, PixServiceFactory};

/// Maximum accepted request body (2 MiB)
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// The composed application: the router plus the realtime hub the caller
/// may want to bridge database change events into.
pub struct App {
    pub router: Router,
    pub realtime: RealtimeHub,
}

/// Create the main application router with all routes and shared services
pub async fn create_app(_config: Config, pool: PgPool) -> Result<App, anyhow::Error> {
    // Create auth config from environment
    let auth_config = AuthConfig {
        jwt_secret: std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
        issuer: std::env::var("JWT_ISSUER").ok(),
        audience: std::env::var("JWT_AUDIENCE").ok(),
    };
    let auth = AuthBackend::new(pool.clone(), auth_config);

    // Hosted auth provider (GoTrue or mock)
    let provider_config = AuthProviderConfig::from_env()?;
    let provider = Arc::from(AuthProviderFactory::create(provider_config)?);

    // Email service from environment
    let email_config = EmailConfig::from_env()?;
    let email: Arc<dyn mimo_email::EmailService> =
        Arc::from(EmailServiceFactory::create(email_config).await?);

    // PIX gateway from environment
    let pix_config = PixConfig::from_env()?;
    let webhook_secret = pix_config.webhook_secret.clone();
    let pix = Arc::from(PixServiceFactory::create(pix_config)?);

    // Realtime fan-out hub shared with the change listener
    let realtime = RealtimeHub::new();

    // Domain states
    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
        provider,
    };
    let creators_state = CreatorsState {
        repos: CreatorsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let conversations_state = ConversationsState {
        repos: ConversationsRepositories::new(pool.clone()),
        auth: auth.clone(),
        realtime: realtime.clone(),
    };
    let payments_state = PaymentsState {
        repos: PaymentsRepositories::new(pool.clone()),
        auth: auth.clone(),
        pix,
        email,
        webhook_secret,
    };
    let notifications_state = NotificationsState {
        repos: NotificationsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let admin_state = AdminState {
        repos: AdminRepositories::new(pool),
        auth,
    };

    // Build router — compose domain routers with shared infrastructure routes
    let router = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Mimo API v0.0.1-SNAPSHOT" }),
        )
        .merge(mimo_accounts::routes().with_state(accounts_state))
        .merge(mimo_creators::routes().with_state(creators_state))
        .merge(mimo_conversations::routes().with_state(conversations_state))
        .merge(mimo_payments::routes().with_state(payments_state))
        .merge(mimo_notifications::routes().with_state(notifications_state))
        .merge(mimo_admin::routes().with_state(admin_state));

    Ok(App { router, realtime })
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Request body size cap shared by both bins
pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Build a CORS layer from a comma-separated origin list ("*" = any)
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|o| o.trim().parse::<HeaderValue>().ok())
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cors_layer_wildcard() {
        // Must not panic and must produce a layer
        let _layer = build_cors_layer("*");
    }

    #[test]
    fn test_build_cors_layer_origin_list() {
        let _layer = build_cors_layer("https://mimo.app, https://admin.mimo.app");
    }
}
