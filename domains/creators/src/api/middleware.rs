//! Creators domain state and auth backend integration

use crate::CreatorsRepositories;
use axum::extract::FromRef;
use mimo_auth::AuthBackend;

/// Application state for the Creators domain
#[derive(Clone)]
pub struct CreatorsState {
    pub repos: CreatorsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<CreatorsState> for AuthBackend {
    fn from_ref(state: &CreatorsState) -> Self {
        state.auth.clone()
    }
}
