//! Payments domain state and auth backend integration

use crate::PaymentsRepositories;
use axum::extract::FromRef;
use mimo_auth::AuthBackend;
use mimo_email::EmailService;
use mimo_pix::PixService;
use std::sync::Arc;

/// Application state for the Payments domain
#[derive(Clone)]
pub struct PaymentsState {
    pub repos: PaymentsRepositories,
    pub auth: AuthBackend,
    pub pix: Arc<dyn PixService>,
    pub email: Arc<dyn EmailService>,
    /// Shared secret for gateway callback signatures
    pub webhook_secret: String,
}

impl FromRef<PaymentsState> for AuthBackend {
    fn from_ref(state: &PaymentsState) -> Self {
        state.auth.clone()
    }
}
