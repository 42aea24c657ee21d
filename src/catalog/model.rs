//! # Uniform Records
//!
//! The one record type of the catalog, as stored and as accepted on create.
//! Values are never re-typed here; the datastore owns the column types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Columns written by create and update. Storage owns `id` and `created_at`.
pub const DATA_FIELDS: [&str; 7] = [
    "nombre",
    "genero",
    "tallas",
    "precio",
    "stock",
    "imagen_hombre",
    "imagen_mujer",
];

/// Storage-assigned identifier; integer or text depending on the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformId {
    Int(i64),
    Text(String),
}

impl UniformId {
    pub fn to_value(&self) -> Value {
        match self {
            UniformId::Int(n) => Value::from(*n),
            UniformId::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for UniformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformId::Int(n) => write!(f, "{n}"),
            UniformId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The data fields present in `body`; everything else is dropped
pub(crate) fn data_fields(body: &Value) -> Map<String, Value> {
    DATA_FIELDS
        .iter()
        .filter_map(|&field| body.get(field).map(|v| (field.to_string(), v.clone())))
        .collect()
}

/// A stored uniform, exactly as the datastore answered it.
///
/// Any data field may be null because an update may have overwritten it,
/// and a table may carry columns beyond [`DATA_FIELDS`].
pub type Uniform = Map<String, Value>;

/// Data fields of a new uniform, after validation. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUniform(Map<String, Value>);

impl NewUniform {
    pub fn from_body(body: &Value) -> Self {
        Self(data_fields(body))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The row to insert: exactly the seven data fields, absent ones as null
    pub fn into_row(mut self) -> Value {
        let row: Map<String, Value> = DATA_FIELDS
            .iter()
            .map(|&field| {
                let value = self.0.remove(field).unwrap_or(Value::Null);
                (field.to_string(), value)
            })
            .collect();
        Value::Object(row)
    }
}
