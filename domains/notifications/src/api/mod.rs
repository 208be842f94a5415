//! API layer for the Notifications domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::NotificationsState;
pub use routes::routes;
