//! Accounts domain: authentication endpoints, profile management

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::Profile;

// Re-export repository types
pub use repository::{AccountsRepositories, ProfileRepository};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
