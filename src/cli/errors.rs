//! CLI-specific error types
//!
//! Any CLI error ends the process with a non-zero exit code.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Runtime or server I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "UNIFORMES_CLI_CONFIG_ERROR",
            CliError::Io(_) => "UNIFORMES_CLI_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_code() {
        let err = CliError::from(ConfigError::Missing("PUBLIC_SUPABASE_URL"));
        assert_eq!(err.code(), "UNIFORMES_CLI_CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "Environment variable PUBLIC_SUPABASE_URL is required"
        );
    }

    #[test]
    fn test_io_error_code() {
        let err = CliError::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy"));
        assert_eq!(err.code(), "UNIFORMES_CLI_IO_ERROR");
    }
}
