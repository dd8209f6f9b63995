//! In-memory `FavoriteRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{PetId, UserId};

/// Favourite rows per user, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFavoriteRepository {
    rows: RwLock<HashMap<UserId, Vec<PetId>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PetId>, FavoriteRepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(user_id)
            .map(|ids| ids.iter().rev().copied().collect())
            .unwrap_or_default())
    }

    async fn add(&self, user_id: &UserId, pet_id: &PetId) -> Result<(), FavoriteRepositoryError> {
        let mut rows = self.rows.write().await;
        let ids = rows.entry(user_id.clone()).or_default();
        if !ids.contains(pet_id) {
            ids.push(*pet_id);
        }
        Ok(())
    }

    async fn remove(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<(), FavoriteRepositoryError> {
        if let Some(ids) = self.rows.write().await.get_mut(user_id) {
            ids.retain(|id| id != pet_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rows_are_scoped_per_user_and_idempotent() {
        let repo = InMemoryFavoriteRepository::new();
        let alice = UserId::random();
        let bob = UserId::random();
        let pet = PetId::random();

        repo.add(&alice, &pet).await.expect("add");
        repo.add(&alice, &pet).await.expect("re-add");

        assert_eq!(repo.list_for_user(&alice).await.expect("list"), vec![pet]);
        assert!(repo.list_for_user(&bob).await.expect("list").is_empty());

        repo.remove(&alice, &pet).await.expect("remove");
        repo.remove(&bob, &pet).await.expect("remove missing");
        assert!(repo.list_for_user(&alice).await.expect("list").is_empty());
    }
}
