//! Port for the pet listing gateway.
//!
//! Adapters translate a [`PetQuery`] into their own query language and own
//! identifier and timestamp assignment on insert.

use async_trait::async_trait;

use crate::domain::{Pet, PetDraft, PetId, PetQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pet repository adapters.
    pub enum PetRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "pet repository connection failed: {message}",
        /// The store rejected or failed to execute the statement.
        Query { message: String } =>
            "pet repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Rows matching every predicate, in the query's order.
    async fn query(&self, query: &PetQuery) -> Result<Vec<Pet>, PetRepositoryError>;

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError>;

    /// Insert a draft, returning the stored record.
    async fn insert(&self, draft: &PetDraft) -> Result<Pet, PetRepositoryError>;

    /// Overwrite a record's client fields. `None` when `id` does not exist.
    async fn update(&self, id: &PetId, draft: &PetDraft)
    -> Result<Option<Pet>, PetRepositoryError>;

    /// Remove a record. `false` when `id` does not exist.
    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError>;
}

/// Repository with no rows that refuses writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePetRepository;

#[async_trait]
impl PetRepository for FixturePetRepository {
    async fn query(&self, _query: &PetQuery) -> Result<Vec<Pet>, PetRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &PetId) -> Result<Option<Pet>, PetRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _draft: &PetDraft) -> Result<Pet, PetRepositoryError> {
        Err(PetRepositoryError::query("fixture repository is read-only"))
    }

    async fn update(
        &self,
        _id: &PetId,
        _draft: &PetDraft,
    ) -> Result<Option<Pet>, PetRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &PetId) -> Result<bool, PetRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PetFilter;

    #[tokio::test]
    async fn fixture_repository_is_empty() {
        let repo = FixturePetRepository;
        let rows = repo
            .query(&PetFilter::any().to_query())
            .await
            .expect("fixture query succeeds");
        assert!(rows.is_empty());
        assert!(!repo.delete(&PetId::random()).await.expect("fixture delete"));
    }

    #[test]
    fn connection_error_formats_message() {
        let err = PetRepositoryError::connection("refused");
        assert_eq!(err.to_string(), "pet repository connection failed: refused");
    }
}
