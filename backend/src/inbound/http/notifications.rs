//! Notification preference handlers.
//!
//! ```text
//! GET /api/v1/users/me/notifications
//! PUT /api/v1/users/me/notifications {"notifyNewPets": true}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::Deserialize;

use crate::domain::ports::NotificationPreferencesRepositoryError;
use crate::domain::{Error, NotificationPreferences};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

const NO_CACHE: (&str, &str) = ("Cache-Control", "private, no-cache");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesRequest {
    pub notify_new_pets: Option<bool>,
}

fn map_preferences_error(error: NotificationPreferencesRepositoryError) -> Error {
    match error {
        NotificationPreferencesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification settings unavailable: {message}"))
        }
        NotificationPreferencesRepositoryError::Query { message } => {
            Error::internal(format!("notification settings query failed: {message}"))
        }
    }
}

/// Stored settings, or opted out when none were saved.
#[get("/users/me/notifications")]
pub async fn get_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let preferences = state
        .notifications
        .find(&user_id)
        .await
        .map_err(map_preferences_error)?
        .unwrap_or_else(|| NotificationPreferences::disabled(user_id));
    Ok(HttpResponse::Ok().insert_header(NO_CACHE).json(preferences))
}

#[put("/users/me/notifications")]
pub async fn update_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NotificationPreferencesRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let notify_new_pets = payload
        .notify_new_pets
        .ok_or_else(|| missing_field_error("notifyNewPets"))?;
    let preferences = NotificationPreferences {
        user_id,
        notify_new_pets,
    };
    state
        .notifications
        .save(&preferences)
        .await
        .map_err(map_preferences_error)?;
    Ok(HttpResponse::Ok().insert_header(NO_CACHE).json(preferences))
}
