//! Public pet listing handlers.
//!
//! ```text
//! GET /api/v1/pets?species=dog,cat&friendly=true&minAge=1&maxAge=5
//! GET /api/v1/pets/search?q=rex&species=dog
//! GET /api/v1/pets/{id}
//! ```

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{Pet, PetFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_bool, parse_pet_id, parse_species_list, parse_u32};

/// Raw listing query string. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetListQuery {
    pub species: Option<String>,
    pub friendly: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

impl PetListQuery {
    /// Parse into a filter; blank values count as absent.
    pub fn to_filter(&self) -> ApiResult<PetFilter> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        let species = match present(&self.species) {
            Some(raw) => parse_species_list(&raw, "species")?,
            None => Vec::new(),
        };
        let friendly = present(&self.friendly)
            .map(|raw| parse_bool(&raw, "friendly"))
            .transpose()?;
        let min_age = present(&self.min_age)
            .map(|raw| parse_u32(&raw, "minAge"))
            .transpose()?;
        let max_age = present(&self.max_age)
            .map(|raw| parse_u32(&raw, "maxAge"))
            .transpose()?;

        Ok(PetFilter::any()
            .with_species(species)
            .with_friendliness(friendly)
            .with_age_range(min_age, max_age))
    }
}

#[derive(Debug, Deserialize)]
pub struct PetSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(flatten)]
    pub filter: PetListQuery,
}

/// Pets matching the filter, newest first.
#[get("/pets")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    query: web::Query<PetListQuery>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    let filter = query.to_filter()?;
    let pets = state.catalogue.fetch_pets(&filter).await?;
    Ok(web::Json(pets))
}

/// Name search. Age bounds in the query string are ignored.
#[get("/pets/search")]
pub async fn search_pets(
    state: web::Data<HttpState>,
    query: web::Query<PetSearchQuery>,
) -> ApiResult<web::Json<Vec<Pet>>> {
    let filter = query.filter.to_filter()?;
    let pets = state.catalogue.search(&query.q, &filter).await?;
    Ok(web::Json(pets))
}

#[get("/pets/{id}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Pet>> {
    let id = parse_pet_id(&path, "id")?;
    let pet = state.catalogue.get(id).await?;
    Ok(web::Json(pet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Species;
    use rstest::rstest;

    fn query(species: &str, friendly: &str, min: &str, max: &str) -> PetListQuery {
        let opt = |value: &str| (!value.is_empty()).then(|| value.to_owned());
        PetListQuery {
            species: opt(species),
            friendly: opt(friendly),
            min_age: opt(min),
            max_age: opt(max),
        }
    }

    #[rstest]
    fn empty_query_is_unrestricted() {
        assert_eq!(query("", "", "", "").to_filter().expect("valid"), PetFilter::any());
    }

    #[rstest]
    fn full_query_builds_filter() {
        let filter = query("dog,cat", "true", "1", "5").to_filter().expect("valid");
        assert_eq!(
            filter,
            PetFilter::any()
                .with_species([Species::Dog, Species::Cat])
                .with_friendliness(Some(true))
                .with_age_range(Some(1), Some(5))
        );
    }

    #[rstest]
    #[case(query("fish", "", "", ""))]
    #[case(query("", "maybe", "", ""))]
    #[case(query("", "", "x", ""))]
    fn malformed_values_are_rejected(#[case] raw: PetListQuery) {
        assert!(raw.to_filter().is_err());
    }
}
