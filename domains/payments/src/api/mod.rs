//! API layer for the Payments domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::PaymentsState;
pub use routes::routes;
