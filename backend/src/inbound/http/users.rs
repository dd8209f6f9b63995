//! Sign-in, sign-out and current-viewer handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoginCredentials, Viewer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(%user_id, "user signed in");
    Ok(HttpResponse::Ok().finish())
}

#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// The resolved viewer; anonymous callers get `{"userId": null, "isAdmin": false}`.
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Viewer>> {
    Ok(web::Json(session.viewer(state.admins.as_ref()).await?))
}
