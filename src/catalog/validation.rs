//! # Request Validation
//!
//! Field checks follow the catalog's long-standing client contract: a
//! required text field counts as given only when it is *truthy* (not null,
//! false, zero, NaN or the empty string), while price and stock only need to
//! be present, so `0` and `null` both pass. Value types are left to the
//! datastore.

use serde_json::{Map, Value};

use super::errors::{Operation, UniformError, UniformResult};
use super::model::{data_fields, NewUniform, UniformId, DATA_FIELDS};

/// Rejection message for an invalid create payload
pub const INVALID_CREATE: &str = "Faltan datos requeridos o formato incorrecto";

/// Rejection message for a missing id
pub const MISSING_ID: &str = "ID del uniforme requerido";

/// How update treats data fields absent from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Every data field is written; absent ones become null
    #[default]
    Overwrite,
    /// Only fields present in the request are written
    Partial,
}

/// Parse a request body. Bodies that are not JSON, and the JSON `null`
/// body whose fields cannot be read, are unexpected failures of `op`.
pub fn parse_body(body: &[u8], op: Operation) -> UniformResult<Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Err(UniformError::unexpected(
            op,
            "Cannot read fields of a null request body",
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(UniformError::unexpected(op, e.to_string())),
    }
}

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_field(body: &Value, name: &str) -> bool {
    body.get(name).is_some_and(is_truthy)
}

/// Validate a create payload and extract its data fields
pub fn validate_create(body: &Value) -> UniformResult<NewUniform> {
    let complete = truthy_field(body, "nombre")
        && truthy_field(body, "genero")
        && body.get("tallas").is_some_and(Value::is_array)
        && body.get("precio").is_some()
        && body.get("stock").is_some();

    if !complete {
        return Err(UniformError::validation(INVALID_CREATE));
    }

    Ok(NewUniform::from_body(body))
}

/// Extract the id of an update or delete payload
pub fn require_id(body: &Value) -> UniformResult<UniformId> {
    match body.get("id") {
        Some(id) if is_truthy(id) => serde_json::from_value(id.clone())
            .map_err(|_| UniformError::validation(MISSING_ID)),
        _ => Err(UniformError::validation(MISSING_ID)),
    }
}

/// Columns an update writes, values taken verbatim from the request
pub fn build_patch(body: &Value, mode: UpdateMode) -> Map<String, Value> {
    match mode {
        UpdateMode::Partial => data_fields(body),
        UpdateMode::Overwrite => DATA_FIELDS
            .iter()
            .map(|&field| {
                let value = body.get(field).cloned().unwrap_or(Value::Null);
                (field.to_string(), value)
            })
            .collect(),
    }
}
