//! Repository implementations for the Notifications domain

pub mod notifications;

use sqlx::PgPool;

pub use notifications::NotificationRepository;

/// Combined repository access for the Notifications domain
#[derive(Clone)]
pub struct NotificationsRepositories {
    pool: PgPool,
    pub notifications: NotificationRepository,
}

impl NotificationsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            notifications: NotificationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
