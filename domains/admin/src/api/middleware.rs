//! Admin domain state and auth backend integration

use crate::AdminRepositories;
use axum::extract::FromRef;
use mimo_auth::AuthBackend;

/// Application state for the Admin domain
#[derive(Clone)]
pub struct AdminState {
    pub repos: AdminRepositories,
    pub auth: AuthBackend,
}

impl FromRef<AdminState> for AuthBackend {
    fn from_ref(state: &AdminState) -> Self {
        state.auth.clone()
    }
}
