//! Authentication for the Mimo API
//!
//! Provides Supabase JWT validation, axum extractors that work with any
//! domain state implementing `FromRef<S>` for `AuthBackend`, and the
//! GoTrue client used by the account endpoints (sign-up, sign-in,
//! sign-out, password recovery).

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gotrue;
mod jwt;
mod mock;
mod provider;
mod types;

pub use backend::AuthBackend;
pub use claims::SupabaseClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AdminUser, AuthUser, CreatorUser};
pub use gotrue::GoTrueClient;
pub use mock::MockAuthProvider;
pub use provider::{
    AuthProvider, AuthProviderConfig, AuthProviderFactory, AuthSession, ProviderError,
    SignUpOutcome,
};
pub use types::{ProfileIdentity, UserRole};
