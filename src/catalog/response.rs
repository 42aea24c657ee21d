//! # Response Envelopes
//!
//! Success bodies carry `{data, message}`, error bodies `{error, detalle}`.
//! Absent members are left out of the JSON rather than sent as null.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Data without a message
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl Envelope<()> {
    /// Message only, no data member
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detalle: None,
        }
    }
}

/// A success envelope paired with its status code
#[derive(Debug)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T> Reply<T> {
    pub fn ok(body: Envelope<T>) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: Envelope<T>) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_omits_message() {
        let json = serde_json::to_value(Envelope::data(vec![1, 2])).unwrap();
        assert_eq!(json, json!({"data": [1, 2]}));
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let json = serde_json::to_value(Envelope::message("Uniforme eliminado exitosamente"))
            .unwrap();
        assert_eq!(json, json!({"message": "Uniforme eliminado exitosamente"}));
    }

    #[test]
    fn test_error_envelope_omits_empty_detail() {
        let json = serde_json::to_value(ErrorEnvelope::new("ID del uniforme requerido")).unwrap();
        assert_eq!(json, json!({"error": "ID del uniforme requerido"}));
    }
}
