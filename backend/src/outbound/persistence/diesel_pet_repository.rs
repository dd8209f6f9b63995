//! PostgreSQL-backed `PetRepository`.
//!
//! A [`PetQuery`] is compiled onto a boxed Diesel select, one `WHERE` clause
//! per predicate. Ids and `created_at` come from column defaults.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{AgeUnit, Pet, PetDraft, PetId, PetOrder, PetPredicate, PetQuery, Species};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{PetFields, PetRow};
use super::pool::{DbPool, PoolError};
use super::schema::pets;

#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PetRepositoryError {
    map_pool_error(error, |message| PetRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> PetRepositoryError {
    map_diesel_error(
        error,
        |message| PetRepositoryError::query(message),
        |message| PetRepositoryError::connection(message),
    )
}

/// Ages beyond `i32::MAX` cannot be stored, but as filter bounds they
/// saturate so the comparison stays correct.
fn age_bound(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Escape `LIKE` metacharacters so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn compile(query: &PetQuery) -> pets::BoxedQuery<'static, Pg> {
    let mut select = pets::table.into_boxed::<Pg>();
    for predicate in query.predicates() {
        select = match predicate {
            PetPredicate::SpeciesIn(set) => {
                let values: Vec<&'static str> = set.iter().map(|s| s.as_str()).collect();
                select.filter(pets::species.eq_any(values))
            }
            PetPredicate::FriendlyIs(friendly) => select.filter(pets::is_friendly.eq(*friendly)),
            PetPredicate::AgeAtLeast(min) => select.filter(pets::age.ge(age_bound(*min))),
            PetPredicate::AgeAtMost(max) => select.filter(pets::age.le(age_bound(*max))),
            PetPredicate::NameContains(term) => select.filter(pets::name.ilike(like_pattern(term))),
        };
    }
    match query.order() {
        PetOrder::CreatedAtDesc => select.order(pets::created_at.desc()),
    }
}

fn fields(draft: &PetDraft) -> Result<PetFields<'_>, PetRepositoryError> {
    let age = i32::try_from(draft.age())
        .map_err(|_| PetRepositoryError::query(format!("age {} is out of range", draft.age())))?;
    Ok(PetFields {
        name: draft.name(),
        age,
        age_unit: draft.age_unit().as_str(),
        species: draft.species().as_str(),
        is_friendly: draft.is_friendly(),
        description: draft.description(),
        contact_phone: draft.contact_phone().as_ref(),
        image_url: draft.image_url(),
    })
}

fn row_to_pet(row: PetRow) -> Pet {
    let species = row.species.parse().unwrap_or_else(|_| {
        warn!(value = %row.species, pet_id = %row.id, "unrecognised species, defaulting to other");
        Species::Other
    });
    let age_unit = row.age_unit.parse().unwrap_or_else(|_| {
        warn!(value = %row.age_unit, pet_id = %row.id, "unrecognised age unit, defaulting to years");
        AgeUnit::Years
    });
    let age = u32::try_from(row.age).unwrap_or_else(|_| {
        warn!(value = row.age, pet_id = %row.id, "negative age, clamping to zero");
        0
    });

    Pet {
        id: PetId::from_uuid(row.id),
        name: row.name,
        age,
        age_unit,
        species,
        is_friendly: row.is_friendly,
        description: row.description,
        contact_phone: row.contact_phone,
        image_url: row.image_url,
        created_at: row.created_at,
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn query(&self, query: &PetQuery) -> Result<Vec<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PetRow> = compile(query)
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_pet).collect())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = pets::table
            .find(*id.as_uuid())
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_pet))
    }

    async fn insert(&self, draft: &PetDraft) -> Result<Pet, PetRepositoryError> {
        let values = fields(draft)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(pets::table)
            .values(&values)
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row_to_pet(row))
    }

    async fn update(
        &self,
        id: &PetId,
        draft: &PetDraft,
    ) -> Result<Option<Pet>, PetRepositoryError> {
        let values = fields(draft)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::update(pets::table.find(*id.as_uuid()))
            .set(&values)
            .returning(PetRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_pet))
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(pets::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PetFilter;
    use diesel::debug_query;
    use rstest::rstest;

    #[rstest]
    #[case("rex", "%rex%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    fn like_pattern_escapes_metacharacters(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[rstest]
    fn unrestricted_query_only_orders() {
        let sql = debug_query::<Pg, _>(&compile(&PetQuery::default())).to_string();
        assert!(!sql.contains("WHERE"), "unexpected filter in {sql}");
        assert!(sql.contains("ORDER BY \"pets\".\"created_at\" DESC"), "{sql}");
    }

    #[rstest]
    fn filter_predicates_become_where_clauses() {
        let query = PetFilter::any()
            .with_species([Species::Dog])
            .with_friendliness(Some(true))
            .with_age_range(Some(1), Some(4))
            .to_query();
        let sql = debug_query::<Pg, _>(&compile(&query)).to_string();
        assert!(sql.contains("\"pets\".\"type\" = ANY"), "{sql}");
        assert!(sql.contains("\"pets\".\"is_friendly\" ="), "{sql}");
        assert!(sql.contains("\"pets\".\"age\" >="), "{sql}");
        assert!(sql.contains("\"pets\".\"age\" <="), "{sql}");
    }

    #[rstest]
    fn oversized_bound_saturates() {
        assert_eq!(age_bound(u32::MAX), i32::MAX);
        assert_eq!(age_bound(7), 7);
    }
}
