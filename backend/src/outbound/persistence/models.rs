//! Internal Diesel row structs.
//!
//! Never exposed to the domain; conversions live in the repositories.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{announcements, pets, user_preferences};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub age_unit: String,
    pub species: String,
    pub is_friendly: bool,
    pub description: String,
    pub contact_phone: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Client-controlled pet columns, used for both insert and update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetFields<'a> {
    pub name: &'a str,
    pub age: i32,
    pub age_unit: &'a str,
    pub species: &'a str,
    pub is_friendly: bool,
    pub description: &'a str,
    pub contact_phone: &'a str,
    pub image_url: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = announcements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnouncementRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserPreferencesRow {
    pub user_id: Uuid,
    pub notifications_new_pets: bool,
}
