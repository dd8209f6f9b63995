//! Port for server-side favourite rows keyed by `(user_id, pet_id)`.

use async_trait::async_trait;

use crate::domain::{PetId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favourite repository adapters.
    pub enum FavoriteRepositoryError {
        Connection { message: String } =>
            "favorite repository connection failed: {message}",
        Query { message: String } =>
            "favorite repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All pets the user has favourited.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PetId>, FavoriteRepositoryError>;

    /// Insert the row. Inserting an existing row is not an error.
    async fn add(&self, user_id: &UserId, pet_id: &PetId) -> Result<(), FavoriteRepositoryError>;

    /// Delete the row. Deleting a missing row is not an error.
    async fn remove(&self, user_id: &UserId, pet_id: &PetId)
    -> Result<(), FavoriteRepositoryError>;
}

/// Repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<PetId>, FavoriteRepositoryError> {
        Ok(Vec::new())
    }

    async fn add(&self, _user_id: &UserId, _pet_id: &PetId) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }

    async fn remove(
        &self,
        _user_id: &UserId,
        _pet_id: &PetId,
    ) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }
}
