//! Repository implementations for the Creators domain

pub mod creators;
pub mod gallery;
pub mod posts;
pub mod services;

use sqlx::PgPool;

pub use creators::{CreatorRepository, ExploreFilters};
pub use gallery::GalleryRepository;
pub use posts::PostRepository;
pub use services::ServiceRepository;

/// Combined repository access for the Creators domain
#[derive(Clone)]
pub struct CreatorsRepositories {
    pool: PgPool,
    pub creators: CreatorRepository,
    pub services: ServiceRepository,
    pub gallery: GalleryRepository,
    pub posts: PostRepository,
}

impl CreatorsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            creators: CreatorRepository::new(pool.clone()),
            services: ServiceRepository::new(pool.clone()),
            gallery: GalleryRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get a reference to the underlying pool (for cross-domain transactions)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
