//! Favourite handlers.
//!
//! Signed-in users read and write their account set. Anonymous callers get a
//! device set keyed by the device id in their session cookie.
//!
//! ```text
//! GET  /api/v1/favorites
//! GET  /api/v1/favorites/pets
//! POST /api/v1/favorites/{petId}/toggle
//! ```

use actix_web::{get, post, web};
use serde::Serialize;

use crate::domain::{Pet, PetFilter, PetId, Viewer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{Favorites, HttpState};
use crate::inbound::http::validation::parse_pet_id;

/// Favourite ids in ascending order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteIdsResponse {
    pub pet_ids: Vec<PetId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponse {
    pub pet_id: PetId,
    pub favorite: bool,
}

async fn favorites_for(state: &HttpState, session: &SessionContext) -> ApiResult<Favorites> {
    let viewer = session
        .user_id()?
        .map_or_else(Viewer::anonymous, Viewer::user);
    let device_id = session.device_id()?;
    Ok(state.favorites_for(&viewer, device_id).await?)
}

#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FavoriteIdsResponse>> {
    let favorites = favorites_for(&state, &session).await?;
    let pet_ids = favorites.favorites().await.into_iter().collect();
    Ok(web::Json(FavoriteIdsResponse { pet_ids }))
}

/// Favourite pets drawn from the unfiltered listing, newest first.
#[get("/favorites/pets")]
pub async fn list_favorite_pets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Pet>>> {
    let favorites = favorites_for(&state, &session).await?;
    let listing = state.catalogue.fetch_pets(&PetFilter::any()).await?;
    Ok(web::Json(favorites.favorite_pets(&listing).await))
}

/// Flip a favourite. Unknown pets are `404`.
#[post("/favorites/{pet_id}/toggle")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleFavoriteResponse>> {
    let pet_id = parse_pet_id(&path, "petId")?;
    state.catalogue.get(pet_id).await?;
    let favorites = favorites_for(&state, &session).await?;
    let favorite = favorites.toggle(pet_id).await?;
    Ok(web::Json(ToggleFavoriteResponse { pet_id, favorite }))
}
