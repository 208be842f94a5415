//! API layer for the Admin domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::AdminState;
pub use routes::routes;
