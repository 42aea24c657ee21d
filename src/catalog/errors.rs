//! # Catalog Errors
//!
//! Every failure of a catalog operation ends up as one of three kinds, each
//! rendered as a JSON error envelope:
//!
//! - validation (400) - required fields missing or malformed
//! - storage (500) - the datastore refused the operation
//! - unexpected (500) - unreadable body, unreachable datastore

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::response::ErrorEnvelope;

/// Result type for catalog operations
pub type UniformResult<T> = Result<T, UniformError>;

/// The four operations of the uniform endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    List,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }

    /// Error message when the datastore rejects this operation
    pub fn storage_failure(&self) -> &'static str {
        match self {
            Operation::Create => "Error al crear el uniforme",
            Operation::Update => "Error al actualizar el uniforme",
            Operation::Delete => "Error al eliminar el uniforme",
            Operation::List => "Error al obtener uniformes",
        }
    }

    /// Whether the datastore's own message is surfaced in `detalle`
    pub fn exposes_storage_detail(&self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }

    /// Message for failures nobody anticipated
    pub fn unexpected_failure(&self) -> &'static str {
        match self {
            Operation::Create => "Error inesperado",
            _ => "Error interno del servidor",
        }
    }

    /// Whether unexpected failures carry their message in `detalle`
    pub fn exposes_unexpected_detail(&self) -> bool {
        matches!(self, Operation::Create)
    }
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformError {
    /// Required fields missing or malformed
    #[error("{message}")]
    Validation { message: &'static str },

    /// The datastore rejected the operation
    #[error("{message}")]
    Storage {
        message: &'static str,
        detail: Option<String>,
    },

    /// Anything else caught at the handler boundary
    #[error("{message}")]
    Unexpected {
        message: &'static str,
        detail: Option<String>,
    },
}

impl UniformError {
    pub fn validation(message: &'static str) -> Self {
        UniformError::Validation { message }
    }

    /// Storage rejection for `op`, keeping the detail only where `op`
    /// exposes it
    pub fn storage(op: Operation, detail: impl Into<String>) -> Self {
        UniformError::Storage {
            message: op.storage_failure(),
            detail: op.exposes_storage_detail().then(|| detail.into()),
        }
    }

    pub fn unexpected(op: Operation, detail: impl Into<String>) -> Self {
        UniformError::Unexpected {
            message: op.unexpected_failure(),
            detail: op.exposes_unexpected_detail().then(|| detail.into()),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            UniformError::Validation { .. } => StatusCode::BAD_REQUEST,
            UniformError::Storage { .. } | UniformError::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            UniformError::Validation { message } => ErrorEnvelope::new(*message),
            UniformError::Storage { message, detail }
            | UniformError::Unexpected { message, detail } => ErrorEnvelope {
                error: message.to_string(),
                detalle: detail.clone(),
            },
        }
    }
}

impl IntoResponse for UniformError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}
