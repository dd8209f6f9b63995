//! Filter criteria and the typed predicate query they compile into.
//!
//! Adapters never see a [`PetFilter`] directly. They receive a [`PetQuery`]:
//! a conjunctive list of [`PetPredicate`]s plus the fixed ordering, and
//! translate it into their own query language. The in-memory evaluation in
//! [`PetQuery::matches`] is the reference semantics every adapter must agree
//! with.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::pet::{Pet, Species};

/// Inclusive age bounds; either side may be open.
///
/// No invariant couples the bounds. An inverted range (`min > max`) is kept
/// as given and simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeRange {
    /// Lowest accepted age, inclusive. `None` leaves the range open below.
    pub min: Option<u32>,
    /// Highest accepted age, inclusive. `None` leaves the range open above.
    pub max: Option<u32>,
}

impl AgeRange {
    /// Bounds as given, without reordering.
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// `true` when both bounds are set and `min > max`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// Criteria chosen on the listing screen.
///
/// An empty species set and an absent friendliness flag both mean
/// "unrestricted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetFilter {
    /// Accepted species; empty accepts every species.
    pub species: BTreeSet<Species>,
    /// Required friendliness flag, if any.
    pub friendliness: Option<bool>,
    pub age_range: AgeRange,
}

impl PetFilter {
    /// Filter with no restrictions.
    pub fn any() -> Self {
        Self::default()
    }

    /// Replace the species set.
    #[must_use]
    pub fn with_species(mut self, species: impl IntoIterator<Item = Species>) -> Self {
        self.species = species.into_iter().collect();
        self
    }

    /// Replace the friendliness requirement.
    #[must_use]
    pub fn with_friendliness(mut self, friendly: Option<bool>) -> Self {
        self.friendliness = friendly;
        self
    }

    /// Replace the age bounds.
    #[must_use]
    pub fn with_age_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.age_range = AgeRange::new(min, max);
        self
    }

    /// Compile the filter into a listing query.
    ///
    /// # Examples
    /// ```
    /// use petpals::domain::{PetFilter, PetPredicate, Species};
    ///
    /// let query = PetFilter::any()
    ///     .with_species([Species::Dog])
    ///     .with_age_range(Some(1), None)
    ///     .to_query();
    /// assert_eq!(query.predicates().len(), 2);
    /// assert!(matches!(query.predicates()[1], PetPredicate::AgeAtLeast(1)));
    /// ```
    pub fn to_query(&self) -> PetQuery {
        let mut predicates = self.attribute_predicates();
        if let Some(min) = self.age_range.min {
            predicates.push(PetPredicate::AgeAtLeast(min));
        }
        if let Some(max) = self.age_range.max {
            predicates.push(PetPredicate::AgeAtMost(max));
        }
        PetQuery::new(predicates)
    }

    /// Compile a name search, honouring species and friendliness but not age.
    pub fn to_search_query(&self, term: &str) -> PetQuery {
        let mut predicates = vec![PetPredicate::NameContains(term.trim().to_owned())];
        predicates.extend(self.attribute_predicates());
        PetQuery::new(predicates)
    }

    fn attribute_predicates(&self) -> Vec<PetPredicate> {
        let mut predicates = Vec::new();
        if !self.species.is_empty() {
            predicates.push(PetPredicate::SpeciesIn(self.species.clone()));
        }
        if let Some(friendly) = self.friendliness {
            predicates.push(PetPredicate::FriendlyIs(friendly));
        }
        predicates
    }
}

/// A single row-level condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PetPredicate {
    /// Species is one of the set.
    SpeciesIn(BTreeSet<Species>),
    FriendlyIs(bool),
    /// Inclusive lower bound on the raw age figure.
    AgeAtLeast(u32),
    /// Inclusive upper bound on the raw age figure.
    AgeAtMost(u32),
    /// Case-insensitive substring match on the name.
    NameContains(String),
}

impl PetPredicate {
    pub fn matches(&self, pet: &Pet) -> bool {
        match self {
            Self::SpeciesIn(set) => set.contains(&pet.species),
            Self::FriendlyIs(friendly) => pet.is_friendly == *friendly,
            Self::AgeAtLeast(min) => pet.age >= *min,
            Self::AgeAtMost(max) => pet.age <= *max,
            Self::NameContains(term) => pet.name.to_lowercase().contains(&term.to_lowercase()),
        }
    }
}

/// Result ordering. Listings are always newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PetOrder {
    #[default]
    CreatedAtDesc,
}

/// Conjunctive predicate list with a fixed ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PetQuery {
    predicates: Vec<PetPredicate>,
    order: PetOrder,
}

impl PetQuery {
    pub fn new(predicates: Vec<PetPredicate>) -> Self {
        Self {
            predicates,
            order: PetOrder::CreatedAtDesc,
        }
    }

    pub fn predicates(&self) -> &[PetPredicate] {
        &self.predicates
    }

    pub fn order(&self) -> PetOrder {
        self.order
    }

    /// `true` when every predicate holds for `pet`.
    pub fn matches(&self, pet: &Pet) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(pet))
    }

    /// Evaluate the query over an in-memory collection.
    pub fn apply<'a>(&self, pets: impl IntoIterator<Item = &'a Pet>) -> Vec<Pet> {
        let mut selected: Vec<Pet> = pets
            .into_iter()
            .filter(|pet| self.matches(pet))
            .cloned()
            .collect();
        match self.order {
            PetOrder::CreatedAtDesc => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgeUnit, PetId};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn pet(name: &str, species: Species, age: u32, friendly: bool, minutes: i64) -> Pet {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid base");
        Pet {
            id: PetId::random(),
            name: name.into(),
            age,
            age_unit: AgeUnit::Years,
            species,
            is_friendly: friendly,
            description: "d".into(),
            contact_phone: "5551234567".into(),
            image_url: "https://example.com/p.jpg".into(),
            created_at: base + Duration::minutes(minutes),
        }
    }

    #[fixture]
    fn pets() -> Vec<Pet> {
        vec![
            pet("Rex", Species::Dog, 3, true, 1),
            pet("Bruno", Species::Dog, 2, false, 2),
            pet("Tom", Species::Cat, 4, true, 3),
        ]
    }

    #[rstest]
    fn unrestricted_filter_has_no_predicates() {
        assert!(PetFilter::any().to_query().predicates().is_empty());
    }

    #[rstest]
    fn unrestricted_query_orders_newest_first(pets: Vec<Pet>) {
        let names: Vec<_> = PetFilter::any()
            .to_query()
            .apply(&pets)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Tom", "Bruno", "Rex"]);
    }

    #[rstest]
    fn combined_filter_selects_friendly_young_dogs(pets: Vec<Pet>) {
        let query = PetFilter::any()
            .with_species([Species::Dog])
            .with_friendliness(Some(true))
            .with_age_range(Some(1), Some(5))
            .to_query();
        let result = query.apply(&pets);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rex");
    }

    #[rstest]
    #[case(Some(2), Some(3), &["Bruno", "Rex"])]
    #[case(Some(4), None, &["Tom"])]
    #[case(None, Some(2), &["Bruno"])]
    #[case(Some(5), Some(1), &[])]
    fn age_bounds_are_inclusive(
        pets: Vec<Pet>,
        #[case] min: Option<u32>,
        #[case] max: Option<u32>,
        #[case] expected: &[&str],
    ) {
        let result = PetFilter::any().with_age_range(min, max).to_query().apply(&pets);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    fn species_set_accepts_any_listed_species(mut pets: Vec<Pet>) {
        pets.push(pet("Kiwi", Species::Other, 1, true, 4));
        let result = PetFilter::any()
            .with_species([Species::Dog, Species::Other])
            .to_query()
            .apply(&pets);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Kiwi", "Bruno", "Rex"]);
        assert!(result.iter().all(|p| p.species != Species::Cat));
    }

    #[rstest]
    fn species_predicate_only_emitted_when_restricted() {
        let query = PetFilter::any().with_friendliness(Some(false)).to_query();
        assert_eq!(query.predicates(), &[PetPredicate::FriendlyIs(false)]);
    }

    #[rstest]
    fn search_ignores_age_range(pets: Vec<Pet>) {
        let filter = PetFilter::any().with_age_range(Some(10), None);
        let result = filter.to_search_query("REX").apply(&pets);
        assert_eq!(result.len(), 1);
    }

    #[rstest]
    fn inverted_range_is_detected() {
        assert!(AgeRange::new(Some(5), Some(1)).is_inverted());
        assert!(!AgeRange::new(Some(1), Some(1)).is_inverted());
        assert!(!AgeRange::new(None, Some(1)).is_inverted());
    }

    #[rstest]
    fn filters_compare_by_value() {
        let a = PetFilter::any().with_species([Species::Cat, Species::Dog]);
        let b = PetFilter::any().with_species([Species::Dog, Species::Cat]);
        assert_eq!(a, b);
    }
}
