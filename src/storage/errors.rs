//! # Storage Errors
//!
//! Failures reported by a [`TableClient`](super::TableClient).

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The datastore answered and refused the operation
    #[error("{message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    /// The datastore could not be reached or its answer could not be read
    #[error("Transport error: {0}")]
    Transport(String),
}

impl StorageError {
    /// Rejection without a backend error code
    pub fn rejected(message: impl Into<String>) -> Self {
        StorageError::Rejected {
            message: message.into(),
            code: None,
        }
    }

    /// Message surfaced to clients in `detalle`
    pub fn message(&self) -> String {
        match self {
            StorageError::Rejected { message, .. } => message.clone(),
            StorageError::Transport(message) => message.clone(),
        }
    }

    /// Whether the datastore itself produced this error
    pub fn is_rejection(&self) -> bool {
        matches!(self, StorageError::Rejected { .. })
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message() {
        let err = StorageError::Rejected {
            message: "duplicate key value".to_string(),
            code: Some("23505".to_string()),
        };
        assert_eq!(err.to_string(), "duplicate key value");
        assert_eq!(err.message(), "duplicate key value");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_transport_is_not_rejection() {
        let err = StorageError::Transport("connection refused".to_string());
        assert!(!err.is_rejection());
        assert_eq!(err.message(), "connection refused");
    }
}
