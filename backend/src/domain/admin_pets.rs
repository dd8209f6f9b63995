//! Administrative CRUD over pet records.
//!
//! Every mutation is followed by a full re-list so callers always receive the
//! post-mutation records. Drafts arrive already validated; this service
//! passes them straight to the gateway.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{Error, Pet, PetDraft, PetId, PetQuery};

/// Mutation or listing failure raised by [`AdminPetService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("pet records are unavailable: {message}")]
    Unavailable { message: String },
    #[error("pet record operation failed: {message}")]
    Gateway { message: String },
    #[error("pet {id} was not found")]
    NotFound { id: PetId },
}

impl From<PetRepositoryError> for RepositoryError {
    fn from(error: PetRepositoryError) -> Self {
        debug!(%error, "admin pet repository call failed");
        match error {
            PetRepositoryError::Connection { message } => Self::Unavailable { message },
            PetRepositoryError::Query { message } => Self::Gateway { message },
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Unavailable { .. } => Error::service_unavailable(error.to_string()),
            RepositoryError::Gateway { .. } => Error::internal(error.to_string()),
            RepositoryError::NotFound { .. } => Error::not_found(error.to_string()),
        }
    }
}

/// Admin CRUD over a [`PetRepository`].
///
/// Every successful mutation re-lists the catalogue, so callers always get
/// the post-mutation records and [`Self::snapshot`] stays current.
pub struct AdminPetService<R: ?Sized> {
    repo: Arc<R>,
    records: RwLock<Vec<Pet>>,
}

impl<R> AdminPetService<R>
where
    R: PetRepository + ?Sized,
{
    /// Service with an empty snapshot; call [`Self::list`] to populate it.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Every pet, newest first. Also refreshes [`Self::snapshot`].
    pub async fn list(&self) -> Result<Vec<Pet>, RepositoryError> {
        let pets = self.repo.query(&PetQuery::default()).await?;
        *self.records.write().await = pets.clone();
        Ok(pets)
    }

    /// A single pet, or [`RepositoryError::NotFound`].
    pub async fn get(&self, id: PetId) -> Result<Pet, RepositoryError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }

    /// List a new pet and return the refreshed records.
    pub async fn add(&self, draft: &PetDraft) -> Result<Vec<Pet>, RepositoryError> {
        let pet = self.repo.insert(draft).await?;
        info!(pet_id = %pet.id, "pet listed");
        self.list().await
    }

    /// Overwrite a pet's client-controlled fields and return the refreshed
    /// records. Unknown ids are [`RepositoryError::NotFound`].
    pub async fn update(&self, id: PetId, draft: &PetDraft) -> Result<Vec<Pet>, RepositoryError> {
        if self.repo.update(&id, draft).await?.is_none() {
            return Err(RepositoryError::NotFound { id });
        }
        info!(pet_id = %id, "pet updated");
        self.list().await
    }

    /// Permanently remove a pet.
    pub async fn delete(&self, id: PetId) -> Result<Vec<Pet>, RepositoryError> {
        if !self.repo.delete(&id).await? {
            return Err(RepositoryError::NotFound { id });
        }
        info!(pet_id = %id, "pet deleted");
        self.list().await
    }

    /// Records from the most recent successful [`Self::list`].
    pub async fn snapshot(&self) -> Vec<Pet> {
        self.records.read().await.clone()
    }
}
