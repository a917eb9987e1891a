//! Field-level validation for write requests.
//!
//! Validation is a typed result rather than an exception: every rule returns
//! the validated value or a structured failure, and handlers convert the
//! failure into an error response. A PATCH body is validated in full before
//! any field is applied, so a failing field never leaves a partial write.

use crate::error::CatalogError;
use crate::model::{NewMission, NewScientist, ScientistPatch};
use serde_json::Value;

/// Fields a scientist PATCH may touch. Identity and relationship fields are
/// deliberately absent.
const SCIENTIST_PATCH_FIELDS: &[&str] = &["name", "field_of_study"];

pub(crate) fn new_scientist(body: &Value) -> Result<NewScientist, CatalogError> {
    let object = as_object(body)?;
    Ok(NewScientist {
        name: non_empty_string(object, "name")?,
        field_of_study: non_empty_string(object, "field_of_study")?,
    })
}

pub(crate) fn scientist_patch(body: &Value) -> Result<ScientistPatch, CatalogError> {
    let object = as_object(body)?;

    for key in object.keys() {
        if !SCIENTIST_PATCH_FIELDS.contains(&key.as_str()) {
            return Err(CatalogError::Validation { message: format!("unknown field: {key}") });
        }
    }

    let mut patch = ScientistPatch::default();
    if object.contains_key("name") {
        patch.name = Some(non_empty_string(object, "name")?);
    }
    if object.contains_key("field_of_study") {
        patch.field_of_study = Some(non_empty_string(object, "field_of_study")?);
    }
    Ok(patch)
}

pub(crate) fn new_mission(body: &Value) -> Result<NewMission, CatalogError> {
    let object = as_object(body)?;
    Ok(NewMission {
        name: non_empty_string(object, "name")?,
        scientist_id: integer(object, "scientist_id")?,
        planet_id: integer(object, "planet_id")?,
    })
}

fn as_object(body: &Value) -> Result<&serde_json::Map<String, Value>, CatalogError> {
    body.as_object().ok_or_else(|| CatalogError::Validation {
        message: "request body must be a JSON object".to_owned(),
    })
}

fn non_empty_string(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, CatalogError> {
    match object.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        _ => Err(CatalogError::Validation {
            message: format!("{key} must be a non-empty string"),
        }),
    }
}

fn integer(object: &serde_json::Map<String, Value>, key: &str) -> Result<i64, CatalogError> {
    object.get(key).and_then(Value::as_i64).ok_or_else(|| CatalogError::Validation {
        message: format!("{key} must be an integer"),
    })
}
