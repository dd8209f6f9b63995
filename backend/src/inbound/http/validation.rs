//! Parsing helpers for query strings and path segments.
//!
//! Failures become `invalid_request` errors whose details name the field, the
//! offending value and a stable code.

use serde_json::json;

use crate::domain::{Error, PetId, Species};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    MissingField,
    InvalidUuid,
    InvalidSpecies,
    InvalidBoolean,
    InvalidNumber,
}

impl Code {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidSpecies => "invalid_species",
            Self::InvalidBoolean => "invalid_boolean",
            Self::InvalidNumber => "invalid_number",
        }
    }
}

fn invalid(field: &str, value: &str, code: Code, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": Code::MissingField.as_str(),
    }))
}

pub(crate) fn parse_pet_id(raw: &str, field: &str) -> Result<PetId, Error> {
    raw.parse()
        .map_err(|_| invalid(field, raw, Code::InvalidUuid, format!("{field} must be a valid UUID")))
}

/// Comma-separated species list; blank entries are ignored.
pub(crate) fn parse_species_list(raw: &str, field: &str) -> Result<Vec<Species>, Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse().map_err(|_| {
                invalid(
                    field,
                    part,
                    Code::InvalidSpecies,
                    format!("{field} must be one of dog, cat, other"),
                )
            })
        })
        .collect()
}

pub(crate) fn parse_bool(raw: &str, field: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(
            field,
            raw,
            Code::InvalidBoolean,
            format!("{field} must be true or false"),
        )),
    }
}

pub(crate) fn parse_u32(raw: &str, field: &str) -> Result<u32, Error> {
    raw.trim().parse().map_err(|_| {
        invalid(
            field,
            raw,
            Code::InvalidNumber,
            format!("{field} must be a non-negative whole number"),
        )
    })
}
