//! PostgreSQL-backed `AdminDirectory` over the `admins` table.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{AdminDirectory, AdminDirectoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::admins;

#[derive(Clone)]
pub struct DieselAdminDirectory {
    pool: DbPool,
}

impl DieselAdminDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminDirectory for DieselAdminDirectory {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, AdminDirectoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, |message| AdminDirectoryError::connection(message)))?;
        diesel::select(exists(admins::table.find(*user_id.as_uuid())))
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    |message| AdminDirectoryError::query(message),
                    |message| AdminDirectoryError::connection(message),
                )
            })
    }
}
