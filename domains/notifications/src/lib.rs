//! Notifications domain: in-app notification feed

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Notification, NotificationKind};

// Re-export repository types
pub use repository::{NotificationRepository, NotificationsRepositories};

// Re-export API types
pub use api::routes;
pub use api::NotificationsState;
