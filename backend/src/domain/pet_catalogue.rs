//! Read-side pet queries: filtered listing, name search and detail lookup.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{Error, Pet, PetFilter, PetId};

/// Read failure surfaced by [`PetCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The gateway could not be reached.
    #[error("pet listings are unavailable: {message}")]
    Unavailable { message: String },
    /// The gateway failed while executing the query.
    #[error("pet listing query failed: {message}")]
    Gateway { message: String },
    #[error("pet {id} was not found")]
    NotFound { id: PetId },
}

impl From<PetRepositoryError> for QueryError {
    fn from(error: PetRepositoryError) -> Self {
        match error {
            PetRepositoryError::Connection { message } => Self::Unavailable { message },
            PetRepositoryError::Query { message } => Self::Gateway { message },
        }
    }
}

impl From<QueryError> for Error {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::Unavailable { .. } => Error::service_unavailable(error.to_string()),
            QueryError::Gateway { .. } => Error::internal(error.to_string()),
            QueryError::NotFound { .. } => Error::not_found(error.to_string()),
        }
    }
}

/// Stateless query service over a [`PetRepository`].
pub struct PetCatalogue<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for PetCatalogue<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PetCatalogue<R>
where
    R: PetRepository + ?Sized,
{
    /// Catalogue reading through `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Pets matching `filter`, newest first.
    pub async fn fetch_pets(&self, filter: &PetFilter) -> Result<Vec<Pet>, QueryError> {
        if filter.age_range.is_inverted() {
            debug!(
                min = ?filter.age_range.min,
                max = ?filter.age_range.max,
                "age range is inverted; listing will be empty"
            );
        }
        self.repo
            .query(&filter.to_query())
            .await
            .map_err(Self::log_failure)
    }

    /// Case-insensitive name search, narrowed by species and friendliness.
    ///
    /// A blank term yields no results without querying the gateway.
    pub async fn search(&self, term: &str, filter: &PetFilter) -> Result<Vec<Pet>, QueryError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.repo
            .query(&filter.to_search_query(term))
            .await
            .map_err(Self::log_failure)
    }

    pub async fn get(&self, id: PetId) -> Result<Pet, QueryError> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(Self::log_failure)?
            .ok_or(QueryError::NotFound { id })
    }

    fn log_failure(error: PetRepositoryError) -> QueryError {
        debug!(%error, "pet repository read failed");
        QueryError::from(error)
    }
}
