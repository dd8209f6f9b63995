//! PostgreSQL-backed `AnnouncementRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Announcement;
use crate::domain::ports::{AnnouncementRepository, AnnouncementRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::AnnouncementRow;
use super::pool::DbPool;
use super::schema::announcements;

/// Most announcements returned by one listing.
const RECENT_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct DieselAnnouncementRepository {
    pool: DbPool,
}

impl DieselAnnouncementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AnnouncementRepository for DieselAnnouncementRepository {
    async fn list_recent(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(|err| {
            map_pool_error(err, |message| AnnouncementRepositoryError::connection(message))
        })?;
        let rows: Vec<AnnouncementRow> = announcements::table
            .order(announcements::created_at.desc())
            .limit(RECENT_LIMIT)
            .select(AnnouncementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    |message| AnnouncementRepositoryError::query(message),
                    |message| AnnouncementRepositoryError::connection(message),
                )
            })?;
        Ok(rows.into_iter().map(Announcement::from).collect())
    }
}
