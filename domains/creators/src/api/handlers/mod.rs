//! API handlers for the Creators domain

pub mod creators;
pub mod gallery;
pub mod posts;
pub mod services;

use mimo_common::{Error, Result};

use crate::api::middleware::CreatorsState;
use crate::domain::entities::Creator;

/// Resolve a creator visible to the public: unknown handles and suspended
/// creators both read as 404.
pub(crate) async fn find_public_creator(
    state: &CreatorsState,
    handle: &str,
) -> Result<Creator> {
    let creator = state
        .repos
        .creators
        .find_by_handle(handle)
        .await?
        .ok_or_else(|| Error::NotFound("Creator not found".to_string()))?;

    if creator.is_suspended() {
        return Err(Error::NotFound("Creator not found".to_string()));
    }

    Ok(creator)
}

/// Resolve the caller's own creator profile.
pub(crate) async fn find_own_creator(
    state: &CreatorsState,
    user_id: uuid::Uuid,
) -> Result<Creator> {
    state
        .repos
        .creators
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Creator profile not found".to_string()))
}
