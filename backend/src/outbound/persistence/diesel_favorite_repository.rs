//! PostgreSQL-backed `FavoriteRepository` over `user_favorites`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{PetId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::user_favorites;

#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FavoriteRepositoryError {
    map_pool_error(error, |message| FavoriteRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_diesel_error(
        error,
        |message| FavoriteRepositoryError::query(message),
        |message| FavoriteRepositoryError::connection(message),
    )
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PetId>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let ids: Vec<Uuid> = user_favorites::table
            .filter(user_favorites::user_id.eq(*user_id.as_uuid()))
            .order(user_favorites::created_at.desc())
            .select(user_favorites::pet_id)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(ids.into_iter().map(PetId::from_uuid).collect())
    }

    async fn add(&self, user_id: &UserId, pet_id: &PetId) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(user_favorites::table)
            .values((
                user_favorites::user_id.eq(*user_id.as_uuid()),
                user_favorites::pet_id.eq(*pet_id.as_uuid()),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn remove(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(user_favorites::table.find((*user_id.as_uuid(), *pet_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }
}
