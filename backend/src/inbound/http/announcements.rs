//! `GET /api/v1/announcements`: newest first, no login required.

use actix_web::{get, web};

use crate::domain::ports::AnnouncementRepositoryError;
use crate::domain::{Announcement, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_announcement_error(error: AnnouncementRepositoryError) -> Error {
    match error {
        AnnouncementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("announcements unavailable: {message}"))
        }
        AnnouncementRepositoryError::Query { message } => {
            Error::internal(format!("announcements query failed: {message}"))
        }
    }
}

#[get("/announcements")]
pub async fn list_announcements(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Announcement>>> {
    let announcements = state
        .announcements
        .list_recent()
        .await
        .map_err(map_announcement_error)?;
    Ok(web::Json(announcements))
}
