//! Shared contract for every boundary schema: the searchable-property marker
//! and the field helpers used to validate raw JSON input.

use serde_json::{Map, Value};
use uuid::{Uuid, Version};

use crate::error::{Result, ValidationError};

/// A schema whose fields may be text-searched by an external search
/// mechanism. Only the properties named in `SEARCHABLE_PROPERTIES` are
/// eligible.
pub trait Searchable {
    const SEARCHABLE_PROPERTIES: &'static [&'static str] = &[];

    /// Value of a searchable property, looked up by field name.
    fn property(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Normalized concatenation of every searchable property value.
    fn search_text(&self) -> String {
        let parts: Vec<String> = Self::SEARCHABLE_PROPERTIES
            .iter()
            .filter_map(|name| self.property(name))
            .map(normalize_search)
            .filter(|s| !s.is_empty())
            .collect();
        parts.join(" ")
    }
}

/// Lowercase, trim, and collapse whitespace runs to a single space.
pub fn normalize_search(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or(ValidationError::NotAnObject)
}

/// Required text field. Any non-string JSON value, `null` included, is a
/// type error.
pub fn require_str(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match map.get(field) {
        None => Err(ValidationError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub fn require_non_empty_str(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    let s = require_str(map, field)?;
    if s.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(s)
}

/// Optional text field, `default` when absent.
pub fn optional_str(
    map: &Map<String, Value>,
    field: &'static str,
    default: &str,
) -> Result<String> {
    if !map.contains_key(field) {
        return Ok(default.to_string());
    }
    require_str(map, field)
}

pub fn require_uuid4(map: &Map<String, Value>, field: &'static str) -> Result<Uuid> {
    let raw = require_str(map, field)?;
    parse_uuid4(field, &raw)
}

pub fn parse_uuid4(field: &'static str, value: &str) -> Result<Uuid> {
    let id = Uuid::parse_str(value).map_err(|_| ValidationError::InvalidUuid {
        field,
        value: value.to_string(),
    })?;
    ensure_uuid4(field, id)
}

pub fn ensure_uuid4(field: &'static str, id: Uuid) -> Result<Uuid> {
    match id.get_version() {
        Some(Version::Random) => Ok(id),
        _ => Err(ValidationError::WrongUuidVersion {
            field,
            value: id.to_string(),
        }),
    }
}
