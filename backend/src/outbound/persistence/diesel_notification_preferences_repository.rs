//! PostgreSQL-backed `NotificationPreferencesRepository`.
//!
//! One row per user in `user_preferences`; saves are upserts.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    NotificationPreferencesRepository, NotificationPreferencesRepositoryError,
};
use crate::domain::{NotificationPreferences, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserPreferencesRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_preferences;

#[derive(Clone)]
pub struct DieselNotificationPreferencesRepository {
    pool: DbPool,
}

impl DieselNotificationPreferencesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NotificationPreferencesRepositoryError {
    map_pool_error(error, |message| {
        NotificationPreferencesRepositoryError::connection(message)
    })
}

fn diesel_error(error: diesel::result::Error) -> NotificationPreferencesRepositoryError {
    map_diesel_error(
        error,
        |message| NotificationPreferencesRepositoryError::query(message),
        |message| NotificationPreferencesRepositoryError::connection(message),
    )
}

#[async_trait]
impl NotificationPreferencesRepository for DieselNotificationPreferencesRepository {
    async fn find(
        &self,
        user_id: &UserId,
    ) -> Result<Option<NotificationPreferences>, NotificationPreferencesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = user_preferences::table
            .find(*user_id.as_uuid())
            .select(UserPreferencesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(|row| NotificationPreferences {
            user_id: UserId::from_uuid(row.user_id),
            notify_new_pets: row.notifications_new_pets,
        }))
    }

    async fn save(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), NotificationPreferencesRepositoryError> {
        let row = UserPreferencesRow {
            user_id: *preferences.user_id.as_uuid(),
            notifications_new_pets: preferences.notify_new_pets,
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(user_preferences::table)
            .values(&row)
            .on_conflict(user_preferences::user_id)
            .do_update()
            .set(
                user_preferences::notifications_new_pets
                    .eq(excluded(user_preferences::notifications_new_pets)),
            )
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }
}
