//! Payments domain: mimos (tips), service payments, webhook reconciliation

pub mod api;
pub mod domain;
pub mod reconcile;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Mimo, PaymentStatus, ServicePayment};
pub use domain::state::{PaymentEvent, PaymentGuardContext, PaymentState, PaymentStateMachine};

// Re-export repository types
pub use repository::{MimoRepository, PaymentsRepositories, ServicePaymentRepository};

// Re-export API types
pub use api::routes;
pub use api::PaymentsState;
