//! Admin pet management handlers.
//!
//! Every route requires an admin viewer. Mutations answer with the full,
//! re-fetched listing.
//!
//! ```text
//! GET    /api/v1/admin/pets
//! POST   /api/v1/admin/pets
//! PUT    /api/v1/admin/pets/{id}
//! DELETE /api/v1/admin/pets/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{AgeUnit, Error, Pet, PetDraft, PetDraftInput, Species};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_pet_id};

/// Age as typed into a form (`"3"`) or sent as a number (`3`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AgeValue {
    Number(u32),
    Text(String),
}

/// Create or edit payload. Field names mirror [`Pet`]'s JSON form.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDraftRequest {
    pub name: Option<String>,
    pub age: Option<AgeValue>,
    pub age_unit: Option<String>,
    #[serde(rename = "type")]
    pub species: Option<String>,
    pub is_friendly: Option<bool>,
    pub description: Option<String>,
    pub contact_phone: Option<String>,
    pub image_url: Option<String>,
}

fn parse_choice<T: std::str::FromStr>(raw: &str, field: &str, allowed: &str) -> ApiResult<T> {
    raw.parse().map_err(|_| {
        Error::invalid_request(format!("{field} must be one of {allowed}")).with_details(json!({
            "field": field,
            "value": raw,
            "code": "invalid_choice",
        }))
    })
}

impl TryFrom<PetDraftRequest> for PetDraft {
    type Error = Error;

    fn try_from(request: PetDraftRequest) -> Result<Self, Self::Error> {
        let age = match request.age.ok_or_else(|| missing_field_error("age"))? {
            AgeValue::Number(age) => age,
            AgeValue::Text(text) => PetDraft::parse_age(&text)?,
        };
        let age_unit: AgeUnit = parse_choice(
            &request.age_unit.ok_or_else(|| missing_field_error("ageUnit"))?,
            "ageUnit",
            "days, months, years",
        )?;
        let species: Species = parse_choice(
            &request.species.ok_or_else(|| missing_field_error("type"))?,
            "type",
            "dog, cat, other",
        )?;

        let input = PetDraftInput {
            name: request.name.unwrap_or_default(),
            age,
            age_unit,
            species,
            is_friendly: request.is_friendly.unwrap_or(false),
            description: request.description.unwrap_or_default(),
            contact_phone: request.contact_phone.unwrap_or_default(),
            image_url: request.image_url.unwrap_or_default(),
        };
        Ok(PetDraft::try_from(input)?)
    }
}

#[get("/admin/pets")]
pub async fn admin_list_pets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Pet>>> {
    session.require_admin(state.admins.as_ref()).await?;
    Ok(web::Json(state.admin_pets.list().await?))
}

#[post("/admin/pets")]
pub async fn admin_add_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PetDraftRequest>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    session.require_admin(state.admins.as_ref()).await?;
    let draft = PetDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.admin_pets.add(&draft).await?))
}

#[put("/admin/pets/{id}")]
pub async fn admin_update_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PetDraftRequest>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    session.require_admin(state.admins.as_ref()).await?;
    let id = parse_pet_id(&path, "id")?;
    let draft = PetDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.admin_pets.update(id, &draft).await?))
}

#[delete("/admin/pets/{id}")]
pub async fn admin_delete_pet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    session.require_admin(state.admins.as_ref()).await?;
    let id = parse_pet_id(&path, "id")?;
    Ok(web::Json(state.admin_pets.delete(id).await?))
}
