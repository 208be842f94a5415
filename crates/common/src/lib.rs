//! Shared utilities, configuration, and error handling for Mimo
//!
//! This crate provides common functionality used across the Mimo application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Request extractors shared by the domain APIs

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use state::StateError;
