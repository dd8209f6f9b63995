//! HTTP inbound adapter exposing the JSON API.

pub mod admin_pets;
pub mod announcements;
pub mod error;
pub mod favorites;
pub mod health;
pub mod notifications;
pub mod pets;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller owns the scope and its session middleware. `/pets/search` is
/// registered ahead of `/pets/{id}` so the literal segment wins.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(pets::list_pets)
        .service(pets::search_pets)
        .service(pets::get_pet)
        .service(favorites::list_favorites)
        .service(favorites::list_favorite_pets)
        .service(favorites::toggle_favorite)
        .service(admin_pets::admin_list_pets)
        .service(admin_pets::admin_add_pet)
        .service(admin_pets::admin_update_pet)
        .service(admin_pets::admin_delete_pet)
        .service(announcements::list_announcements)
        .service(notifications::get_notifications)
        .service(notifications::update_notifications);
}
