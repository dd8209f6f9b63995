//! Diesel table definitions.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Listed pets. Species is stored in the `type` column.
    pets (id) {
        id -> Uuid,
        name -> Text,
        age -> Int4,
        age_unit -> Text,
        #[sql_name = "type"]
        species -> Text,
        is_friendly -> Bool,
        description -> Text,
        contact_phone -> Text,
        image_url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Server-side favourites, one row per `(user, pet)` pair.
    user_favorites (user_id, pet_id) {
        user_id -> Uuid,
        pet_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    admins (user_id) {
        user_id -> Uuid,
    }
}

diesel::table! {
    announcements (id) {
        id -> Uuid,
        title -> Text,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_preferences (user_id) {
        user_id -> Uuid,
        notifications_new_pets -> Bool,
    }
}

diesel::joinable!(user_favorites -> pets (pet_id));

diesel::allow_tables_to_appear_in_same_query!(
    admins,
    announcements,
    pets,
    user_favorites,
    user_preferences,
);
