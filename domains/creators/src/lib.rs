//! Creators domain: profiles, services, gallery, posts, explore catalog

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Creator, CreatorService, CreatorStatus, GalleryItem, Post};

// Re-export repository types
pub use repository::{
    CreatorRepository, CreatorsRepositories, GalleryRepository, PostRepository,
    ServiceRepository,
};

// Re-export API types
pub use api::routes;
pub use api::CreatorsState;
