//! Conversations domain state and auth backend integration

use crate::realtime::RealtimeHub;
use crate::ConversationsRepositories;
use axum::extract::FromRef;
use mimo_auth::AuthBackend;

/// Application state for the Conversations domain
#[derive(Clone)]
pub struct ConversationsState {
    pub repos: ConversationsRepositories,
    pub auth: AuthBackend,
    pub realtime: RealtimeHub,
}

impl FromRef<ConversationsState> for AuthBackend {
    fn from_ref(state: &ConversationsState) -> Self {
        state.auth.clone()
    }
}
