//! Pet listing records and the validated draft used to create or edit them.
//!
//! A [`Pet`] is what the persistence gateway returns: it carries the
//! gateway-assigned identifier and creation timestamp. A [`PetDraft`] is the
//! client-controlled field set and can only be built through validation.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Opaque pet identifier assigned by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(Uuid);

impl PetId {
    /// Wrap an identifier read back from the gateway.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`PetId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Error returned when parsing an enumerated pet attribute fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParsePetAttributeError {
    kind: &'static str,
    value: String,
}

macro_rules! text_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )*
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Stored and wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParsePetAttributeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $text => Ok(Self::$variant), )*
                    _ => Err(ParsePetAttributeError {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Kind of animal. Stored in the `type` column.
    pub enum Species as "species" {
        Dog => "dog",
        Cat => "cat",
        Other => "other",
    }
}

text_enum! {
    /// Unit the `age` figure is expressed in.
    ///
    /// Age filters compare the raw figure and ignore the unit.
    pub enum AgeUnit as "age unit" {
        Days => "days",
        Months => "months",
        Years => "years",
    }
}

/// A listed pet as stored by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub age: u32,
    pub age_unit: AgeUnit,
    /// Serialised as `type` on the wire.
    #[serde(rename = "type")]
    pub species: Species,
    pub is_friendly: bool,
    pub description: String,
    pub contact_phone: String,
    pub image_url: String,
    /// Assigned by the gateway; listings sort on it, newest first.
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Materialise a stored record from a draft plus gateway-owned fields.
    pub fn from_draft(id: PetId, created_at: DateTime<Utc>, draft: &PetDraft) -> Self {
        Self {
            id,
            name: draft.name().to_owned(),
            age: draft.age(),
            age_unit: draft.age_unit(),
            species: draft.species(),
            is_friendly: draft.is_friendly(),
            description: draft.description().to_owned(),
            contact_phone: draft.contact_phone().as_ref().to_owned(),
            image_url: draft.image_url().to_owned(),
            created_at,
        }
    }

    /// Overwrite the client-controlled fields, keeping id and timestamp.
    pub fn apply(&mut self, draft: &PetDraft) {
        *self = Self::from_draft(self.id, self.created_at, draft);
    }
}

/// Validation failures raised while building a [`PetDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetDraftValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("age must be a whole number, got {value:?}")]
    InvalidAge { value: String },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("contact phone must be 7 to 15 digits with an optional leading +")]
    InvalidContactPhone,
    #[error("image url must not be empty")]
    EmptyImageUrl,
    #[error("image url must be an absolute URL: {reason}")]
    InvalidImageUrl { reason: String },
}

impl PetDraftValidationError {
    /// Name of the offending field, as used on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::InvalidAge { .. } => "age",
            Self::EmptyDescription => "description",
            Self::InvalidContactPhone => "contactPhone",
            Self::EmptyImageUrl | Self::InvalidImageUrl { .. } => "imageUrl",
        }
    }
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]{7,15}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Contact phone number: 7 to 15 ASCII digits, optionally prefixed with `+`.
///
/// # Examples
/// ```
/// use petpals::domain::ContactPhone;
///
/// assert!(ContactPhone::new("+15551234567").is_ok());
/// assert!(ContactPhone::new("555-1234").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactPhone(String);

impl ContactPhone {
    /// Validate a phone number, trimming surrounding whitespace first.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PetDraftValidationError> {
        let raw = raw.as_ref().trim();
        if phone_regex().is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(PetDraftValidationError::InvalidContactPhone)
        }
    }
}

impl AsRef<str> for ContactPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unvalidated draft fields, as collected from a form or request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraftInput {
    pub name: String,
    /// Whole number, interpreted in `age_unit`.
    pub age: u32,
    pub age_unit: AgeUnit,
    pub species: Species,
    pub is_friendly: bool,
    pub description: String,
    pub contact_phone: String,
    /// Absolute URL of the listing photo.
    pub image_url: String,
}

/// Client-controlled pet fields that passed validation.
///
/// ## Invariants
/// - `name` and `description` are non-empty after trimming.
/// - `contact_phone` is 7 to 15 ASCII digits with an optional leading `+`.
/// - `image_url` parses as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    name: String,
    age: u32,
    age_unit: AgeUnit,
    species: Species,
    is_friendly: bool,
    description: String,
    contact_phone: ContactPhone,
    image_url: String,
}

impl PetDraft {
    /// Parse a free-text age as a base-10 whole number.
    ///
    /// # Examples
    /// ```
    /// use petpals::domain::PetDraft;
    ///
    /// assert_eq!(PetDraft::parse_age(" 3 ").unwrap(), 3);
    /// assert!(PetDraft::parse_age("three").is_err());
    /// ```
    pub fn parse_age(raw: &str) -> Result<u32, PetDraftValidationError> {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| PetDraftValidationError::InvalidAge {
                value: raw.to_owned(),
            })
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age figure, read together with [`PetDraft::age_unit`].
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Unit the age is expressed in.
    pub fn age_unit(&self) -> AgeUnit {
        self.age_unit
    }

    /// Kind of animal.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Whether the pet is marked as good with people and other animals.
    pub fn is_friendly(&self) -> bool {
        self.is_friendly
    }

    /// Trimmed free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Validated phone number for adoption enquiries.
    pub fn contact_phone(&self) -> &ContactPhone {
        &self.contact_phone
    }

    /// Absolute photo URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl TryFrom<PetDraftInput> for PetDraft {
    type Error = PetDraftValidationError;

    fn try_from(input: PetDraftInput) -> Result<Self, Self::Error> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(PetDraftValidationError::EmptyName);
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(PetDraftValidationError::EmptyDescription);
        }
        let contact_phone = ContactPhone::new(&input.contact_phone)?;
        let image_url = input.image_url.trim();
        if image_url.is_empty() {
            return Err(PetDraftValidationError::EmptyImageUrl);
        }
        Url::parse(image_url).map_err(|err| PetDraftValidationError::InvalidImageUrl {
            reason: err.to_string(),
        })?;

        Ok(Self {
            name: name.to_owned(),
            age: input.age,
            age_unit: input.age_unit,
            species: input.species,
            is_friendly: input.is_friendly,
            description: description.to_owned(),
            contact_phone,
            image_url: image_url.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn input() -> PetDraftInput {
        PetDraftInput {
            name: "Rex".into(),
            age: 3,
            age_unit: AgeUnit::Years,
            species: Species::Dog,
            is_friendly: true,
            description: "Loves walks".into(),
            contact_phone: "+15551234567".into(),
            image_url: "https://example.com/rex.jpg".into(),
        }
    }

    #[rstest]
    fn valid_input_builds_trimmed_draft(mut input: PetDraftInput) {
        input.name = "  Rex ".into();
        let draft = PetDraft::try_from(input).expect("valid draft");
        assert_eq!(draft.name(), "Rex");
        assert_eq!(draft.contact_phone().as_ref(), "+15551234567");
    }

    #[rstest]
    #[case::blank_name(|i: &mut PetDraftInput| i.name = "  ".into(), "name")]
    #[case::blank_description(|i: &mut PetDraftInput| i.description = String::new(), "description")]
    #[case::short_phone(|i: &mut PetDraftInput| i.contact_phone = "12345".into(), "contactPhone")]
    #[case::dashed_phone(|i: &mut PetDraftInput| i.contact_phone = "555-123-4567".into(), "contactPhone")]
    #[case::arabic_indic_phone(|i: &mut PetDraftInput| i.contact_phone = "٠١٢٣٤٥٦٧٨".into(), "contactPhone")]
    #[case::long_phone(|i: &mut PetDraftInput| i.contact_phone = "+1234567890123456".into(), "contactPhone")]
    #[case::blank_url(|i: &mut PetDraftInput| i.image_url = " ".into(), "imageUrl")]
    #[case::relative_url(|i: &mut PetDraftInput| i.image_url = "rex.jpg".into(), "imageUrl")]
    fn invalid_fields_are_rejected(
        mut input: PetDraftInput,
        #[case] mutate: fn(&mut PetDraftInput),
        #[case] field: &str,
    ) {
        mutate(&mut input);
        let err = PetDraft::try_from(input).expect_err("invalid draft");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("12", Some(12))]
    #[case(" 7 ", Some(7))]
    #[case("2.5", None)]
    #[case("-1", None)]
    #[case("", None)]
    #[case("ten", None)]
    fn parse_age_accepts_whole_numbers_only(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(PetDraft::parse_age(raw).ok(), expected);
    }

    #[rstest]
    #[case("DOG", Species::Dog)]
    #[case("cat", Species::Cat)]
    #[case(" other", Species::Other)]
    fn species_parses_case_insensitively(#[case] raw: &str, #[case] expected: Species) {
        assert_eq!(raw.parse::<Species>().expect("known species"), expected);
    }

    #[rstest]
    fn unknown_species_reports_value() {
        let err = "bird".parse::<Species>().expect_err("unknown species");
        assert_eq!(err.to_string(), "unknown species: bird");
    }

    #[rstest]
    fn apply_keeps_identity_and_timestamp(input: PetDraftInput) {
        let draft = PetDraft::try_from(input.clone()).expect("valid draft");
        let created_at = Utc::now();
        let mut pet = Pet::from_draft(PetId::random(), created_at, &draft);
        let id = pet.id;

        let edited = PetDraft::try_from(PetDraftInput {
            name: "Max".into(),
            ..input
        })
        .expect("valid draft");
        pet.apply(&edited);

        assert_eq!(pet.id, id);
        assert_eq!(pet.created_at, created_at);
        assert_eq!(pet.name, "Max");
    }

    #[rstest]
    fn pet_serialises_species_as_type(input: PetDraftInput) {
        let draft = PetDraft::try_from(input).expect("valid draft");
        let pet = Pet::from_draft(PetId::random(), Utc::now(), &draft);
        let value = serde_json::to_value(&pet).expect("serialise pet");
        assert_eq!(value["type"], "dog");
        assert_eq!(value["ageUnit"], "years");
        assert_eq!(value["isFriendly"], true);
    }
}
