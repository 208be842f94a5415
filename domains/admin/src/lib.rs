//! Admin domain: dashboard stats, user/payment listings, moderation, FAQ

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::FaqEntry;

// Re-export repository types
pub use repository::{AdminRepositories, AdminRepository, FaqRepository};

// Re-export API types
pub use api::routes;
pub use api::AdminState;
