//! Repository implementations for the Payments domain

pub mod mimos;
pub mod service_payments;
pub mod transactions;

use sqlx::PgPool;

pub use mimos::MimoRepository;
pub use service_payments::ServicePaymentRepository;

pub(crate) const MIMO_COLUMNS: &str = r#"
    id, client_id, creator_id, amount, message, status,
    provider_tx_id, brcode, end_to_end_id, paid_at,
    created_at, updated_at
"#;

pub(crate) const SERVICE_PAYMENT_COLUMNS: &str = r#"
    id, client_id, creator_id, service_id, conversation_id,
    amount, status, provider_tx_id, brcode, end_to_end_id,
    paid_at, created_at, updated_at
"#;

/// Combined repository access for the Payments domain
#[derive(Clone)]
pub struct PaymentsRepositories {
    pool: PgPool,
    pub mimos: MimoRepository,
    pub service_payments: ServicePaymentRepository,
}

impl PaymentsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            mimos: MimoRepository::new(pool.clone()),
            service_payments: ServicePaymentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get a reference to the underlying pool (for reconciliation transactions)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
