//! In-memory `PetRepository` evaluating queries with [`PetQuery::apply`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{Pet, PetDraft, PetId, PetQuery};

#[derive(Debug, Default)]
pub struct InMemoryPetRepository {
    pets: RwLock<Vec<Pet>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `pets`.
    pub fn with_pets(pets: impl IntoIterator<Item = Pet>) -> Self {
        Self {
            pets: RwLock::new(pets.into_iter().collect()),
        }
    }
}

/// Insertion timestamps strictly increase so newest-first order is total.
fn next_created_at(pets: &[Pet]) -> DateTime<Utc> {
    let now = Utc::now();
    match pets.iter().map(|pet| pet.created_at).max() {
        Some(latest) if latest >= now => latest + Duration::microseconds(1),
        _ => now,
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn query(&self, query: &PetQuery) -> Result<Vec<Pet>, PetRepositoryError> {
        Ok(query.apply(self.pets.read().await.iter()))
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let pets = self.pets.read().await;
        Ok(pets.iter().find(|pet| pet.id == *id).cloned())
    }

    async fn insert(&self, draft: &PetDraft) -> Result<Pet, PetRepositoryError> {
        let mut pets = self.pets.write().await;
        let pet = Pet::from_draft(PetId::random(), next_created_at(&pets), draft);
        pets.push(pet.clone());
        Ok(pet)
    }

    async fn update(
        &self,
        id: &PetId,
        draft: &PetDraft,
    ) -> Result<Option<Pet>, PetRepositoryError> {
        let mut pets = self.pets.write().await;
        Ok(pets.iter_mut().find(|pet| pet.id == *id).map(|pet| {
            pet.apply(draft);
            pet.clone()
        }))
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError> {
        let mut pets = self.pets.write().await;
        let before = pets.len();
        pets.retain(|pet| pet.id != *id);
        Ok(pets.len() < before)
    }
}
