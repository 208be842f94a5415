//! Repository implementations for the Admin domain

pub mod admin;
pub mod faq;

use sqlx::PgPool;

pub use admin::{
    AdminPaymentRow, AdminRepository, CreatorStatusCounts, PaymentKindStats, UserCounts,
};
pub use faq::FaqRepository;

/// Combined repository access for the Admin domain
#[derive(Clone)]
pub struct AdminRepositories {
    pool: PgPool,
    pub admin: AdminRepository,
    pub faq: FaqRepository,
}

impl AdminRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            admin: AdminRepository::new(pool.clone()),
            faq: FaqRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
