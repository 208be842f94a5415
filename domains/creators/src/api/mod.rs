//! API layer for the Creators domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::CreatorsState;
pub use routes::routes;
