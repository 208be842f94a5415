//! Notifications domain state and auth backend integration

use crate::NotificationsRepositories;
use axum::extract::FromRef;
use mimo_auth::AuthBackend;

/// Application state for the Notifications domain
#[derive(Clone)]
pub struct NotificationsState {
    pub repos: NotificationsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<NotificationsState> for AuthBackend {
    fn from_ref(state: &NotificationsState) -> Self {
        state.auth.clone()
    }
}
